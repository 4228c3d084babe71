// src/handlers/matches.rs

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
    middleware::{auth::Authenticated, client_meta::ExtractClientMeta, rbac::RequireAdmin},
    models::matches::{CreateMatchPayload, Match, UpdateMatchPayload},
};

pub async fn create_match(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateMatchPayload>,
) -> Result<(StatusCode, Json<Match>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let partido = app_state
        .match_service
        .create_match(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(partido)))
}

pub async fn list_matches(
    State(app_state): State<AppState>,
    Authenticated(_ctx): Authenticated,
) -> Result<Json<Vec<Match>>, AppError> {
    Ok(Json(app_state.match_service.list_matches().await?))
}

pub async fn get_match(
    State(app_state): State<AppState>,
    Authenticated(_ctx): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<Match>, AppError> {
    Ok(Json(app_state.match_service.get_match(id).await?))
}

pub async fn update_match(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMatchPayload>,
) -> Result<Json<Match>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let partido = app_state
        .match_service
        .update_match(&ctx, &meta, id, payload)
        .await?;
    Ok(Json(partido))
}
