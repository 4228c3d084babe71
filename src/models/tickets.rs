// src/models/tickets.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    Pending,
    Approved,
    PartiallyApproved,
    Rejected,
}

// Solicitação de entradas de uma filial para um partido.
// Invariante: a soma das alocações nunca excede `quantity_requested`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub match_id: Uuid,
    pub requested_by: Uuid,
    pub quantity_requested: i64,
    pub state: RequestState,
    pub observations: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<Uuid>,
}

// Concessão (possivelmente parcial) de uma solicitação,
// carimbada com o administrador que aprovou.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketAllocation {
    pub id: Uuid,
    pub request_id: Uuid,
    pub quantity: i64,
    pub allocated_by: Uuid,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    // Ignorado para usuários de filial: o alcance força a filial do chamador.
    pub branch_id: Option<Uuid>,
    pub match_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade solicitada deve ser maior que zero."))]
    pub quantity_requested: i64,
    #[serde(default)]
    pub observations: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequestPayload {
    #[validate(range(min = 1, message = "A quantidade alocada deve ser maior que zero."))]
    pub allocated_quantity: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequestPayload {
    pub motive: Option<String>,
}

// Representação da solicitação com suas alocações
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: TicketRequest,
    pub allocations: Vec<TicketAllocation>,
}
