// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::Authenticated, rbac::RequireAdmin},
    models::auth::{
        AuthResponse, CreateUserPayload, LoginUserPayload, MeResponse, RegisterUserPayload, Role,
    },
};

// Handler de registro público: sempre cria um usuário de filial.
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_user(
            &payload.username,
            &payload.email,
            &payload.password,
            Role::BranchUser,
            payload.branch_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler da rota protegida /me
pub async fn get_me(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<MeResponse>, AppError> {
    Ok(Json(app_state.auth_service.me(&ctx).await?))
}

// Criação administrativa de usuários, com qualquer papel.
pub async fn create_user(
    State(app_state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_user(
            &payload.username,
            &payload.email,
            &payload.password,
            payload.role,
            payload.branch_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}
