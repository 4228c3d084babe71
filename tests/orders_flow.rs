// tests/orders_flow.rs
//
// Ciclo de vida dos pedidos de mercadorias: criação, decisão e entrega.

mod common;

use common::{admin_ctx, app_state, meta, register_ctx, seed_branch};
use filiales_backend::models::{
    auth::Role,
    orders::{
        CreateOrderItemPayload, CreateOrderPayload, CreateProductPayload, OrderDecisionPayload,
        OrderState, Product,
    },
};

async fn seed_product(
    state: &filiales_backend::config::AppState,
    ctx: &filiales_backend::models::auth::AuthContext,
    sku: &str,
) -> Product {
    state
        .order_service
        .create_product(
            ctx,
            &meta(),
            CreateProductPayload {
                name: format!("Camiseta {sku}"),
                sku: sku.to_string(),
                category: "Indumentária".to_string(),
                unit: "unidade".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn order_is_approved_and_then_delivered() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let product = seed_product(&state, &admin, "CAM-01").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

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
                    quantity: 30,
                    detail: "Talle M".to_string(),
                }],
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.order.state, OrderState::Pending);
    assert_eq!(detail.items.len(), 1);

    let detail = state
        .order_service
        .approve(
            &admin,
            &meta(),
            detail.order.id,
            OrderDecisionPayload { motive: None },
        )
        .await
        .unwrap();
    assert_eq!(detail.order.state, OrderState::Approved);

    let detail = state
        .order_service
        .deliver(&admin, &meta(), detail.order.id)
        .await
        .unwrap();
    assert_eq!(detail.order.state, OrderState::Delivered);
}

#[tokio::test]
async fn only_pending_orders_accept_a_decision() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let product = seed_product(&state, &admin, "CAM-01").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

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
                    quantity: 10,
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

    let err = state
        .order_service
        .approve(
            &admin,
            &meta(),
            detail.order.id,
            OrderDecisionPayload { motive: None },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("resolvido"));
}

#[tokio::test]
async fn pending_order_can_be_delivered_directly() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let product = seed_product(&state, &admin, "CAM-01").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

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
                    quantity: 10,
                    detail: String::new(),
                }],
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.order.state, OrderState::Pending);

    // Entrega sem passar pela aprovação
    let detail = state
        .order_service
        .deliver(&admin, &meta(), detail.order.id)
        .await
        .unwrap();
    assert_eq!(detail.order.state, OrderState::Delivered);
}

#[tokio::test]
async fn rejected_order_cannot_be_delivered() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let product = seed_product(&state, &admin, "CAM-01").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

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
                    quantity: 10,
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
            OrderDecisionPayload { motive: None },
        )
        .await
        .unwrap();

    let err = state
        .order_service
        .deliver(&admin, &meta(), detail.order.id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("entregue"));
}

#[tokio::test]
async fn order_with_unknown_product_is_rejected_upfront() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let err = state
        .order_service
        .create_order(
            &user,
            &meta(),
            CreateOrderPayload {
                branch_id: None,
                observations: String::new(),
                items: vec![CreateOrderItemPayload {
                    product_id: uuid::Uuid::new_v4(),
                    quantity: 10,
                    detail: String::new(),
                }],
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("não existe"));

    let orders = state.order_service.list_orders(&admin).await.unwrap();
    assert!(orders.is_empty());
}
