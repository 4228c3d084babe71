// src/handlers/orders.rs

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
    models::orders::{
        CreateOrderPayload, CreateProductPayload, Order, OrderDecisionPayload, OrderDetail, Product,
    },
};

// --- Produtos ---

pub async fn create_product(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let product = app_state
        .order_service
        .create_product(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(
    State(app_state): State<AppState>,
    Authenticated(_ctx): Authenticated,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(app_state.order_service.list_products().await?))
}

// --- Pedidos ---

pub async fn create_order(
    State(app_state): State<AppState>,
    RequireWriter(ctx): RequireWriter,
    ExtractClientMeta(meta): ExtractClientMeta,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<(StatusCode, Json<OrderDetail>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let detail = app_state
        .order_service
        .create_order(&ctx, &meta, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_orders(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(app_state.order_service.list_orders(&ctx).await?))
}

pub async fn get_order(
    State(app_state): State<AppState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, AppError> {
    Ok(Json(app_state.order_service.get_order(&ctx, id).await?))
}

pub async fn approve_order(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderDecisionPayload>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = app_state
        .order_service
        .approve(&ctx, &meta, id, payload)
        .await?;
    Ok(Json(detail))
}

pub async fn reject_order(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderDecisionPayload>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = app_state
        .order_service
        .reject(&ctx, &meta, id, payload)
        .await?;
    Ok(Json(detail))
}

pub async fn deliver_order(
    State(app_state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    ExtractClientMeta(meta): ExtractClientMeta,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = app_state.order_service.deliver(&ctx, &meta, id).await?;
    Ok(Json(detail))
}
