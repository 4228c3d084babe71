// src/services/notifier.rs
//
// Saída best-effort: e-mail SMTP e webhooks HTTP. Cada canal tem sua própria
// flag; com a flag desligada, destinatário vazio ou destino sem URL o envio
// vira um no-op com log de debug. Falhas de transporte são capturadas e
// logadas, nunca propagadas: o sucesso da operação de negócio não depende
// de nenhuma entrega daqui. Sem fila, sem retry, sem garantia.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
    message::Mailbox,
};
use std::time::Duration;

// Destinos de webhook, por família de evento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    Audit,
    Events,
}

impl WebhookKind {
    fn label(&self) -> &'static str {
        match self {
            WebhookKind::Audit => "audit",
            WebhookKind::Events => "events",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotifierConfig {
    pub emails_enabled: bool,
    pub webhooks_enabled: bool,
    pub webhook_url_audit: Option<String>,
    pub webhook_url_events: Option<String>,
    pub smtp_url: Option<String>,
    pub smtp_from: Option<String>,
}

pub struct Notifier {
    config: NotifierConfig,
    http: reqwest::Client,
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Notifier {
    pub fn new(config: NotifierConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        // SMTP é opcional: sem URL configurada o canal de e-mail fica mudo.
        let mailer = match &config.smtp_url {
            Some(url) => Some(AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build()),
            None => None,
        };
        let from = match &config.smtp_from {
            Some(addr) => Some(addr.parse::<Mailbox>()?),
            None => None,
        };

        Ok(Self {
            config,
            http,
            mailer,
            from,
        })
    }

    /// Envia um e-mail para cada destinatário não vazio. Nunca falha.
    pub async fn send_email(&self, subject: &str, body: &str, recipients: &[String]) {
        if !self.config.emails_enabled {
            tracing::debug!("E-mails desabilitados, pulando envio de '{}'", subject);
            return;
        }

        let recipients: Vec<&String> = recipients.iter().filter(|r| !r.is_empty()).collect();
        if recipients.is_empty() {
            return;
        }

        let (Some(mailer), Some(from)) = (&self.mailer, &self.from) else {
            tracing::debug!("SMTP não configurado, pulando envio de '{}'", subject);
            return;
        };

        for recipient in recipients {
            let mailbox = match recipient.parse::<Mailbox>() {
                Ok(mb) => mb,
                Err(e) => {
                    tracing::error!("Destinatário inválido '{}': {}", recipient, e);
                    continue;
                }
            };
            let email = match Email::builder()
                .from(from.clone())
                .to(mailbox)
                .subject(subject)
                .body(body.to_string())
            {
                Ok(email) => email,
                Err(e) => {
                    tracing::error!("Falha ao montar e-mail '{}': {}", subject, e);
                    continue;
                }
            };
            if let Err(e) = mailer.send(email).await {
                tracing::error!("Erro ao enviar e-mail '{}': {}", subject, e);
            }
        }
    }

    /// POST JSON para o destino da família do evento. Nunca falha.
    pub async fn dispatch_webhook(&self, kind: WebhookKind, payload: serde_json::Value) {
        if !self.config.webhooks_enabled {
            tracing::debug!("Webhooks desabilitados, pulando '{}'", kind.label());
            return;
        }

        let url = match kind {
            WebhookKind::Audit => self.config.webhook_url_audit.as_deref(),
            WebhookKind::Events => self.config.webhook_url_events.as_deref(),
        };
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            tracing::debug!("Sem URL de webhook configurada para '{}'", kind.label());
            return;
        };

        if let Err(e) = self.http.post(url).json(&payload).send().await {
            tracing::error!("Erro ao despachar webhook '{}': {}", kind.label(), e);
        }
    }
}
