// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    services::{
        audit::AuditService,
        auth::AuthService,
        branch_service::BranchService,
        dashboard_service::DashboardService,
        match_service::MatchService,
        message_service::MessageService,
        notifier::{Notifier, NotifierConfig},
        order_service::OrderService,
        ticket_service::TicketService,
    },
    store::{MemoryStore, PgStore, Store},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub db_pool: Option<PgPool>,
    pub auth_service: AuthService,
    pub branch_service: BranchService,
    pub match_service: MatchService,
    pub ticket_service: TicketService,
    pub order_service: OrderService,
    pub message_service: MessageService,
    pub dashboard_service: DashboardService,
    pub audit_service: AuditService,
}

impl AppState {
    // A assinatura retorna um Result: configuração quebrada derruba o boot.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Sem DATABASE_URL o serviço sobe com o armazenamento em memória,
        // útil para desenvolvimento local e testes de integração.
        let (store, db_pool): (Arc<dyn Store>, Option<PgPool>) = match env::var("DATABASE_URL") {
            Ok(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(&database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                (Arc::new(PgStore::new(pool.clone())), Some(pool))
            }
            Err(_) => {
                tracing::warn!("DATABASE_URL ausente; usando armazenamento em memória.");
                (Arc::new(MemoryStore::new()), None)
            }
        };

        let notifier_config = NotifierConfig {
            emails_enabled: env_flag("EMAILS_ENABLED"),
            webhooks_enabled: env_flag("WEBHOOKS_ENABLED"),
            webhook_url_audit: env::var("WEBHOOK_URL_AUDIT").ok(),
            webhook_url_events: env::var("WEBHOOK_URL_EVENTS").ok(),
            smtp_url: env::var("SMTP_URL").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
        };

        let mut state = Self::assemble(store, jwt_secret, notifier_config)?;
        state.db_pool = db_pool;
        Ok(state)
    }

    /// Monta o estado sobre um armazenamento arbitrário. É o caminho dos
    /// testes de integração.
    pub fn with_store(
        store: Arc<dyn Store>,
        jwt_secret: String,
        notifier_config: NotifierConfig,
    ) -> anyhow::Result<Self> {
        Self::assemble(store, jwt_secret, notifier_config)
    }

    // --- Monta o gráfico de dependências ---
    fn assemble(
        store: Arc<dyn Store>,
        jwt_secret: String,
        notifier_config: NotifierConfig,
    ) -> anyhow::Result<Self> {
        let notifier = Arc::new(Notifier::new(notifier_config)?);

        let audit_service = AuditService::new(store.clone(), notifier.clone());
        let auth_service = AuthService::new(store.clone(), jwt_secret);
        let branch_service =
            BranchService::new(store.clone(), audit_service.clone(), notifier.clone());
        let match_service = MatchService::new(store.clone(), audit_service.clone());
        let ticket_service =
            TicketService::new(store.clone(), audit_service.clone(), notifier.clone());
        let order_service =
            OrderService::new(store.clone(), audit_service.clone(), notifier.clone());
        let message_service = MessageService::new(store.clone(), audit_service.clone());
        let dashboard_service = DashboardService::new(store.clone());

        Ok(Self {
            store,
            db_pool: None,
            auth_service,
            branch_service,
            match_service,
            ticket_service,
            order_service,
            message_service,
            dashboard_service,
            audit_service,
        })
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
