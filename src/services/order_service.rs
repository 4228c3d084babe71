// src/services/order_service.rs
//
// Catálogo de produtos e pedidos de mercadorias. Um pedido pendente pode
// ser aprovado, rejeitado ou entregue direto; um aprovado ainda pode ser
// entregue. Nenhuma checagem de estoque acontece aqui.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{ActionKind, ClientMeta},
        auth::AuthContext,
        orders::{
            CreateOrderPayload, CreateProductPayload, Order, OrderDecisionPayload, OrderDetail,
            OrderItem, OrderState, Product,
        },
    },
    services::{
        audit::AuditService,
        notifier::{Notifier, WebhookKind},
        resolve_target_branch,
    },
    store::Store,
};

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn Store>,
    audit: AuditService,
    notifier: Arc<Notifier>,
}

impl OrderService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService, notifier: Arc<Notifier>) -> Self {
        Self {
            store,
            audit,
            notifier,
        }
    }

    // --- Produtos ---

    pub async fn create_product(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateProductPayload,
    ) -> Result<Product, AppError> {
        let now = Utc::now();
        let product = self
            .store
            .create_product(Product {
                id: Uuid::new_v4(),
                name: payload.name,
                sku: payload.sku,
                category: payload.category,
                unit: payload.unit,
                description: payload.description,
                active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.audit
            .record(
                ctx,
                meta,
                "Product",
                product.id,
                ActionKind::Create,
                json!({ "sku": product.sku, "name": product.name }),
                None,
            )
            .await?;

        Ok(product)
    }

    // O catálogo é compartilhado: qualquer usuário autenticado enxerga tudo.
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.store.list_products().await?)
    }

    // --- Pedidos ---

    pub async fn create_order(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        let branch_id = resolve_target_branch(ctx, payload.branch_id)?;
        self.store
            .get_branch(branch_id)
            .await?
            .ok_or(AppError::Invalid("A filial informada não existe.".to_string()))?;

        // Todos os produtos precisam existir antes de gravar qualquer coisa.
        for item in &payload.items {
            self.store.get_product(item.product_id).await?.ok_or_else(|| {
                AppError::Invalid(format!("O produto {} não existe.", item.product_id))
            })?;
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let items: Vec<OrderItem> = payload
            .items
            .into_iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                detail: item.detail,
            })
            .collect();

        let order = Order {
            id: order_id,
            branch_id,
            state: OrderState::Pending,
            observations: payload.observations,
            created_by: ctx.user_id,
            created_at: now,
            updated_at: now,
        };
        let order = self.store.create_order(order, items).await?;
        let items = self.store.items_for_order(order.id).await?;

        self.audit
            .record(
                ctx,
                meta,
                "Order",
                order.id,
                ActionKind::Create,
                json!({ "itemCount": items.len() }),
                Some(branch_id),
            )
            .await?;

        Ok(OrderDetail { order, items })
    }

    pub async fn list_orders(&self, ctx: &AuthContext) -> Result<Vec<Order>, AppError> {
        Ok(self.store.list_orders(ctx.read_scope()).await?)
    }

    pub async fn get_order(&self, ctx: &AuthContext, id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .store
            .get_order(id)
            .await?
            .filter(|o| ctx.read_scope().allows(Some(o.branch_id)))
            .ok_or(AppError::NotFound("Pedido"))?;
        let items = self.store.items_for_order(id).await?;
        Ok(OrderDetail { order, items })
    }

    pub async fn approve(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        payload: OrderDecisionPayload,
    ) -> Result<OrderDetail, AppError> {
        self.decide(ctx, meta, id, OrderState::Approved, ActionKind::Approve, payload)
            .await
    }

    pub async fn reject(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        payload: OrderDecisionPayload,
    ) -> Result<OrderDetail, AppError> {
        self.decide(ctx, meta, id, OrderState::Rejected, ActionKind::Reject, payload)
            .await
    }

    /// Marca a entrega de um pedido pendente ou aprovado.
    pub async fn deliver(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
    ) -> Result<OrderDetail, AppError> {
        let mut order = self
            .store
            .get_order(id)
            .await?
            .ok_or(AppError::NotFound("Pedido"))?;

        if !matches!(order.state, OrderState::Pending | OrderState::Approved) {
            return Err(AppError::Invalid(
                "O pedido não pode mais ser entregue.".to_string(),
            ));
        }

        order.state = OrderState::Delivered;
        order.updated_at = Utc::now();
        let order = self.store.update_order(order).await?;

        self.audit
            .record(
                ctx,
                meta,
                "Order",
                order.id,
                ActionKind::Update,
                json!({ "state": order.state }),
                Some(order.branch_id),
            )
            .await?;

        self.notify_branch(
            &order,
            "Pedido de mercadorias entregue",
            &format!("O pedido {} foi marcado como entregue.", order.id),
            json!({ "event": "order_delivered", "orderId": order.id, "state": order.state }),
        )
        .await;

        let items = self.store.items_for_order(order.id).await?;
        Ok(OrderDetail { order, items })
    }

    async fn decide(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        state: OrderState,
        action: ActionKind,
        payload: OrderDecisionPayload,
    ) -> Result<OrderDetail, AppError> {
        let mut order = self
            .store
            .get_order(id)
            .await?
            .ok_or(AppError::NotFound("Pedido"))?;

        if order.state != OrderState::Pending {
            return Err(AppError::Invalid(
                "O pedido já foi resolvido.".to_string(),
            ));
        }

        order.state = state;
        if let Some(motive) = payload.motive.clone() {
            order.observations = motive;
        }
        order.updated_at = Utc::now();
        let order = self.store.update_order(order).await?;

        self.audit
            .record(
                ctx,
                meta,
                "Order",
                order.id,
                action,
                json!({ "state": order.state, "motive": payload.motive }),
                Some(order.branch_id),
            )
            .await?;

        let (subject, event) = match state {
            OrderState::Approved => ("Pedido de mercadorias aprovado", "order_approved"),
            _ => ("Pedido de mercadorias rejeitado", "order_rejected"),
        };
        let body = match &payload.motive {
            Some(motive) => format!("O pedido {} mudou de estado. Motivo: {}", order.id, motive),
            None => format!("O pedido {} mudou de estado.", order.id),
        };
        self.notify_branch(
            &order,
            subject,
            &body,
            json!({
                "event": event,
                "orderId": order.id,
                "state": order.state,
                "motive": payload.motive,
            }),
        )
        .await;

        let items = self.store.items_for_order(order.id).await?;
        Ok(OrderDetail { order, items })
    }

    async fn notify_branch(
        &self,
        order: &Order,
        subject: &str,
        body: &str,
        payload: serde_json::Value,
    ) {
        if let Ok(Some(branch)) = self.store.get_branch(order.branch_id).await {
            if let Some(email) = branch.contact_email {
                self.notifier
                    .send_email(subject, body, std::slice::from_ref(&email))
                    .await;
            }
        }
        self.notifier
            .dispatch_webhook(WebhookKind::Events, payload)
            .await;
    }
}
