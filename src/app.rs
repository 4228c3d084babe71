// src/app.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::{config::AppState, handlers, middleware::auth::auth_middleware};

/// Monta o router completo. Separado do main para os testes de integração
/// montarem a aplicação inteira sem abrir porta.
pub fn router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo abaixo exige Bearer token válido.
    let protected_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        .route("/users", post(handlers::auth::create_user))
        .route(
            "/branches",
            post(handlers::branches::create_branch).get(handlers::branches::list_branches),
        )
        .route("/branches/{id}", get(handlers::branches::get_branch))
        .route("/branches/{id}", put(handlers::branches::update_branch))
        .route("/branches/{id}/enable", post(handlers::branches::enable_branch))
        .route("/branches/{id}/disable", post(handlers::branches::disable_branch))
        .route(
            "/authorities",
            post(handlers::branches::create_authority).get(handlers::branches::list_authorities),
        )
        .route(
            "/matches",
            post(handlers::matches::create_match).get(handlers::matches::list_matches),
        )
        .route(
            "/matches/{id}",
            get(handlers::matches::get_match).put(handlers::matches::update_match),
        )
        .route(
            "/requests",
            post(handlers::tickets::create_request).get(handlers::tickets::list_requests),
        )
        .route("/requests/{id}", get(handlers::tickets::get_request))
        .route("/requests/{id}/approve", post(handlers::tickets::approve_request))
        .route("/requests/{id}/reject", post(handlers::tickets::reject_request))
        .route(
            "/products",
            post(handlers::orders::create_product).get(handlers::orders::list_products),
        )
        .route(
            "/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/orders/{id}", get(handlers::orders::get_order))
        .route("/orders/{id}/approve", post(handlers::orders::approve_order))
        .route("/orders/{id}/reject", post(handlers::orders::reject_order))
        .route("/orders/{id}/deliver", post(handlers::orders::deliver_order))
        .route(
            "/conversations",
            post(handlers::messages::create_conversation)
                .get(handlers::messages::list_conversations),
        )
        .route(
            "/conversations/{id}/messages",
            get(handlers::messages::list_messages),
        )
        .route("/messages", post(handlers::messages::create_message))
        .route("/messages/{id}/read", post(handlers::messages::mark_message_read))
        .route("/audit", get(handlers::audit::list_audit))
        .route("/dashboard", get(handlers::dashboard::summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .with_state(app_state)
}
