// src/handlers/dashboard.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::Authenticated,
    services::dashboard_service::DashboardSummary,
};

pub async fn summary(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(app_state.dashboard_service.summary(&ctx).await?))
}
