// src/handlers/audit.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::Authenticated,
    models::audit::AuditAction,
};

// A trilha de auditoria só tem superfície de leitura. Registros sem filial
// associada ficam restritos a quem enxerga tudo.
pub async fn list_audit(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Vec<AuditAction>>, AppError> {
    Ok(Json(app_state.store.list_audit(ctx.read_scope()).await?))
}
