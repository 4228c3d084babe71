// src/handlers/tickets.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::Authenticated,
        client_meta::ExtractClientMeta,
        rbac::{RequireAdmin, RequireWriter},
    },
    models::tickets::{
        ApproveRequestPayload, CreateRequestPayload, RejectRequestPayload, RequestDetail,
        TicketRequest,
    },
};

pub async fn create_request(
    State(app_state): State<AppState>,
    RequireWriter(ctx): RequireWriter,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<(StatusCode, Json<TicketRequest>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let request = app_state
        .ticket_service
        .create_request(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_requests(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Vec<TicketRequest>>, AppError> {
    Ok(Json(app_state.ticket_service.list_requests(&ctx).await?))
}

pub async fn get_request(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestDetail>, AppError> {
    Ok(Json(app_state.ticket_service.get_request(&ctx, id).await?))
}

pub async fn approve_request(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveRequestPayload>,
) -> Result<Json<RequestDetail>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let detail = app_state
        .ticket_service
        .approve(&ctx, &meta, id, payload)
        .await?;
    Ok(Json(detail))
}

pub async fn reject_request(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequestPayload>,
) -> Result<Json<RequestDetail>, AppError> {
    let detail = app_state
        .ticket_service
        .reject(&ctx, &meta, id, payload)
        .await?;
    Ok(Json(detail))
}
