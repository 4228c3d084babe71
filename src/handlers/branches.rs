// src/handlers/branches.rs

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
    models::branch::{
        Authority, Branch, CreateAuthorityPayload, CreateBranchPayload, UpdateBranchPayload,
    },
};

// --- Filiales ---

pub async fn create_branch(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateBranchPayload>,
) -> Result<(StatusCode, Json<Branch>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let branch = app_state
        .branch_service
        .create_branch(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn list_branches(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Vec<Branch>>, AppError> {
    Ok(Json(app_state.branch_service.list_branches(&ctx).await?))
}

pub async fn get_branch(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<Branch>, AppError> {
    Ok(Json(app_state.branch_service.get_branch(&ctx, id).await?))
}

pub async fn update_branch(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBranchPayload>,
) -> Result<Json<Branch>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let branch = app_state
        .branch_service
        .update_branch(&ctx, &meta, id, payload)
        .await?;
    Ok(Json(branch))
}

pub async fn enable_branch(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
) -> Result<Json<Branch>, AppError> {
    let branch = app_state
        .branch_service
        .set_active(&ctx, &meta, id, true)
        .await?;
    Ok(Json(branch))
}

pub async fn disable_branch(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
) -> Result<Json<Branch>, AppError> {
    let branch = app_state
        .branch_service
        .set_active(&ctx, &meta, id, false)
        .await?;
    Ok(Json(branch))
}

// --- Autoridades ---

pub async fn create_authority(
    State(app_state): State<AppState>,
    RequireWriter(ctx): RequireWriter,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateAuthorityPayload>,
) -> Result<(StatusCode, Json<Authority>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let authority = app_state
        .branch_service
        .create_authority(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(authority)))
}

pub async fn list_authorities(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Vec<Authority>>, AppError> {
    Ok(Json(app_state.branch_service.list_authorities(&ctx).await?))
}
