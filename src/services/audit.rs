// src/services/audit.rs

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{ActionKind, AuditAction, ClientMeta},
        auth::AuthContext,
    },
    services::notifier::{Notifier, WebhookKind},
    store::Store,
};

// Gravador da trilha de auditoria. A escrita no banco é síncrona e faz
// parte do caminho da operação de negócio; o webhook de auditoria dispara
// depois, fora de qualquer transação, e falha em silêncio.
#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn Store>,
    notifier: Arc<Notifier>,
}

impl AuditService {
    pub fn new(store: Arc<dyn Store>, notifier: Arc<Notifier>) -> Self {
        Self { store, notifier }
    }

    pub async fn record(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        resource: &str,
        resource_id: Uuid,
        action: ActionKind,
        payload: serde_json::Value,
        branch_id: Option<Uuid>,
    ) -> Result<AuditAction, AppError> {
        let entry = AuditAction {
            id: Uuid::new_v4(),
            actor_id: Some(ctx.user_id),
            branch_id,
            resource: resource.to_string(),
            resource_id: resource_id.to_string(),
            action,
            payload,
            ip: meta.ip.clone(),
            user_agent: meta.user_agent.clone(),
            created_at: Utc::now(),
        };

        let saved = self.store.append_audit(entry).await?;

        // Best-effort: a entrega do webhook não interfere no resultado.
        self.notifier
            .dispatch_webhook(
                WebhookKind::Audit,
                json!({
                    "id": saved.id,
                    "actor": saved.actor_id,
                    "branch": saved.branch_id,
                    "resource": saved.resource,
                    "resourceId": saved.resource_id,
                    "action": saved.action,
                    "payload": saved.payload,
                }),
            )
            .await;

        Ok(saved)
    }
}
