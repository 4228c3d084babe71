// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Tipos de ação registrados na trilha de auditoria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    Enable,
    Disable,
    ChangeAuthority,
    AssignTickets,
}

// Registro imutável de uma operação que mudou estado.
// A API apenas lista: nunca atualiza nem remove.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditAction {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub resource: String,
    pub resource_id: String,
    pub action: ActionKind,
    pub payload: serde_json::Value,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Contexto do cliente HTTP anexado aos registros de auditoria
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
