// src/models/orders.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Item do catálogo compartilhado de produtos
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub unit: String,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Pending,
    Approved,
    Rejected,
    Delivered,
    // Existe no modelo mas nenhuma rota chega até aqui.
    Cancelled,
}

// Pedido de mercadorias de uma filial. Nenhuma validação de estoque
// acontece nesta camada: os itens são pares produto/quantidade livres.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub state: OrderState,
    pub observations: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub detail: String,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemPayload {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i64,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    // Ignorado para usuários de filial: o alcance força a filial do chamador.
    pub branch_id: Option<Uuid>,
    #[serde(default)]
    pub observations: String,
    #[validate(length(min = 1, message = "O pedido deve ter ao menos um item."))]
    #[validate(nested)]
    pub items: Vec<CreateOrderItemPayload>,
}

#[derive(Debug, Deserialize)]
pub struct OrderDecisionPayload {
    pub motive: Option<String>,
}

// Representação do pedido com seus itens
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_requires_at_least_one_item() {
        let payload = CreateOrderPayload {
            branch_id: None,
            observations: String::new(),
            items: vec![],
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn item_quantity_must_be_positive() {
        let payload = CreateOrderPayload {
            branch_id: None,
            observations: String::new(),
            items: vec![CreateOrderItemPayload {
                product_id: Uuid::new_v4(),
                quantity: 0,
                detail: String::new(),
            }],
        };
        assert!(payload.validate().is_err());
    }
}
