// tests/common/mod.rs

// Nem todo binário de teste usa todos os helpers.
#![allow(dead_code)]

use std::sync::Arc;

use filiales_backend::{
    config::AppState,
    models::{
        audit::ClientMeta,
        auth::{AuthContext, Role},
        branch::{Branch, CreateBranchPayload},
        matches::{CreateMatchPayload, Match},
    },
    services::notifier::NotifierConfig,
    store::MemoryStore,
};
use rust_decimal::Decimal;

pub fn app_state() -> AppState {
    app_state_with_notifier(NotifierConfig::default())
}

pub fn app_state_with_notifier(config: NotifierConfig) -> AppState {
    AppState::with_store(
        Arc::new(MemoryStore::new()),
        "segredo-de-teste".to_string(),
        config,
    )
    .expect("estado de teste")
}

pub fn meta() -> ClientMeta {
    ClientMeta::default()
}

/// Registra um usuário com o papel pedido e devolve o contexto autenticado,
/// passando pelo mesmo caminho de token da aplicação real.
pub async fn register_ctx(
    state: &AppState,
    username: &str,
    role: Role,
    branch_id: Option<uuid::Uuid>,
) -> AuthContext {
    let token = state
        .auth_service
        .register_user(
            username,
            &format!("{username}@example.com"),
            "senha-secreta",
            role,
            branch_id,
        )
        .await
        .expect("registro de usuário de teste");
    state
        .auth_service
        .validate_token(&token)
        .await
        .expect("token de teste")
}

pub async fn admin_ctx(state: &AppState) -> AuthContext {
    register_ctx(state, "admin", Role::Administrator, None).await
}

pub async fn seed_branch(state: &AppState, ctx: &AuthContext, code: &str) -> Branch {
    state
        .branch_service
        .create_branch(
            ctx,
            &meta(),
            CreateBranchPayload {
                code: code.to_string(),
                name: format!("Filial {code}"),
                description: String::new(),
                address: "Calle 1 n 100".to_string(),
                city: "La Plata".to_string(),
                province: "Buenos Aires".to_string(),
                country: "Argentina".to_string(),
                latitude: Some(Decimal::new(-34_9215, 4)),
                longitude: Some(Decimal::new(-57_9545, 4)),
                contact_email: Some(format!("{code}@example.com")),
                contact_phone: None,
            },
        )
        .await
        .expect("filial de teste")
}

pub async fn seed_match(
    state: &AppState,
    ctx: &AuthContext,
    capacity_total: Option<i64>,
) -> Match {
    state
        .match_service
        .create_match(
            ctx,
            &meta(),
            CreateMatchPayload {
                title: "Estudiantes vs Gimnasia".to_string(),
                date: chrono::Utc::now() + chrono::Duration::days(7),
                venue: "Estadio UNO".to_string(),
                description: String::new(),
                capacity_total,
            },
        )
        .await
        .expect("partido de teste")
}
