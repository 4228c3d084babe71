// src/handlers/messages.rs

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
    middleware::{auth::Authenticated, client_meta::ExtractClientMeta, rbac::RequireWriter},
    models::messages::{
        Conversation, CreateConversationPayload, CreateMessagePayload, Message,
    },
};

pub async fn create_conversation(
    State(app_state): State<AppState>,
    RequireWriter(ctx): RequireWriter,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateConversationPayload>,
) -> Result<(StatusCode, Json<Conversation>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let conversation = app_state
        .message_service
        .create_conversation(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

pub async fn list_conversations(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Vec<Conversation>>, AppError> {
    Ok(Json(
        app_state.message_service.list_conversations(&ctx).await?,
    ))
}

pub async fn create_message(
    State(app_state): State<AppState>,
    RequireWriter(ctx): RequireWriter,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateMessagePayload>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let message = app_state
        .message_service
        .create_message(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn list_messages(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(
        app_state
            .message_service
            .list_messages(&ctx, conversation_id)
            .await?,
    ))
}

// Marca leitura; repetir a chamada não muda nada.
pub async fn mark_message_read(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(app_state.message_service.mark_read(&ctx, id).await?))
}
