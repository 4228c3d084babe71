// tests/notifier.rs
//
// Saída best-effort: com as flags desligadas nada sai; com webhook ligado a
// trilha de auditoria é espelhada; falha no destino nunca derruba a
// operação de negócio.

mod common;

use common::{admin_ctx, app_state_with_notifier, meta, register_ctx, seed_branch, seed_match};
use filiales_backend::{
    models::{
        auth::Role,
        orders::{
            CreateOrderItemPayload, CreateOrderPayload, CreateProductPayload, OrderDecisionPayload,
        },
        tickets::{ApproveRequestPayload, CreateRequestPayload, RequestState},
    },
    services::notifier::NotifierConfig,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn disabled_webhooks_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = app_state_with_notifier(NotifierConfig {
        webhooks_enabled: false,
        webhook_url_audit: Some(format!("{}/audit", server.uri())),
        webhook_url_events: Some(format!("{}/events", server.uri())),
        ..Default::default()
    });

    let admin = admin_ctx(&state).await;
    seed_branch(&state, &admin, "LP").await;
    // O Drop do MockServer verifica a expectativa de zero chamadas.
}

#[tokio::test]
async fn enabled_webhook_mirrors_audit_records() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1..)
        .mount(&server)
        .await;

    let state = app_state_with_notifier(NotifierConfig {
        webhooks_enabled: true,
        webhook_url_audit: Some(format!("{}/audit", server.uri())),
        ..Default::default()
    });

    let admin = admin_ctx(&state).await;
    seed_branch(&state, &admin, "LP").await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["resource"], "Branch");
    assert_eq!(body["action"], "CREATE");
}

#[tokio::test]
async fn approval_survives_a_broken_webhook_destination() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let state = app_state_with_notifier(NotifierConfig {
        webhooks_enabled: true,
        webhook_url_audit: Some(format!("{}/audit", server.uri())),
        webhook_url_events: Some(format!("{}/events", server.uri())),
        ..Default::default()
    });

    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, Some(100)).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 10,
                observations: String::new(),
            },
        )
        .await
        .unwrap();
    let detail = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 10,
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.request.state, RequestState::Approved);
}

#[tokio::test]
async fn events_webhook_fires_on_request_decisions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // Só o canal de eventos configurado: a auditoria fica muda.
    let state = app_state_with_notifier(NotifierConfig {
        webhooks_enabled: true,
        webhook_url_events: Some(format!("{}/events", server.uri())),
        ..Default::default()
    });

    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, None).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 4,
                observations: String::new(),
            },
        )
        .await
        .unwrap();
    state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 4,
                comment: None,
            },
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["event"], "request_approved");
    assert_eq!(body["allocatedQuantity"], 4);
}

#[tokio::test]
async fn order_decision_webhook_carries_state_and_motive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let state = app_state_with_notifier(NotifierConfig {
        webhooks_enabled: true,
        webhook_url_events: Some(format!("{}/events", server.uri())),
        ..Default::default()
    });

    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;
    let product = state
        .order_service
        .create_product(
            &admin,
            &meta(),
            CreateProductPayload {
                name: "Camiseta titular".to_string(),
                sku: "CAM-01".to_string(),
                category: "Indumentária".to_string(),
                unit: "unidade".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let detail = state
        .order_service
        .create_order(
            &user,
            &meta(),
            CreateOrderPayload {
                branch_id: None,
                observations: String::new(),
                items: vec![CreateOrderItemPayload {
                    product_id: product.id,
                    quantity: 5,
                    detail: String::new(),
                }],
            },
        )
        .await
        .unwrap();

    state
        .order_service
        .reject(
            &admin,
            &meta(),
            detail.order.id,
            OrderDecisionPayload {
                motive: Some("Fora de época".to_string()),
            },
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["event"], "order_rejected");
    assert_eq!(body["state"], "REJECTED");
    assert_eq!(body["motive"], "Fora de época");
}
