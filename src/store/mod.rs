// src/store/mod.rs

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    audit::AuditAction,
    auth::{Profile, Scope, User},
    branch::{Authority, Branch, Office},
    matches::Match,
    messages::{Conversation, Message},
    orders::{Order, OrderItem, Product},
    tickets::{TicketAllocation, TicketRequest},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("não encontrado: {0}")]
    NotFound(&'static str),
    #[error("conflito: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Contrato de persistência. Os serviços só conhecem este trait; por trás
/// dele existem o `PgStore` (produção) e o `MemoryStore` (testes e
/// desenvolvimento local sem banco).
///
/// Todas as operações de listagem recebem o `Scope` do chamador e devolvem
/// apenas as linhas visíveis dentro dele. Nenhum método expõe update/delete
/// de auditoria: a trilha é escrita uma única vez.
#[async_trait]
pub trait Store: Send + Sync {
    // --- usuários e perfis ---
    async fn create_user(&self, user: User) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn create_profile(&self, profile: Profile) -> StoreResult<Profile>;
    async fn profile_for_user(&self, user_id: Uuid) -> StoreResult<Option<Profile>>;

    // --- filiais ---
    async fn create_branch(&self, branch: Branch) -> StoreResult<Branch>;
    async fn update_branch(&self, branch: Branch) -> StoreResult<Branch>;
    async fn get_branch(&self, id: Uuid) -> StoreResult<Option<Branch>>;
    async fn list_branches(&self, scope: Scope) -> StoreResult<Vec<Branch>>;

    // --- autoridades ---
    async fn create_authority(&self, authority: Authority) -> StoreResult<Authority>;
    async fn update_authority(&self, authority: Authority) -> StoreResult<Authority>;
    async fn list_authorities(&self, scope: Scope) -> StoreResult<Vec<Authority>>;
    async fn active_authority(
        &self,
        branch_id: Uuid,
        office: Office,
    ) -> StoreResult<Option<Authority>>;

    // --- partidos ---
    async fn create_match(&self, m: Match) -> StoreResult<Match>;
    async fn update_match(&self, m: Match) -> StoreResult<Match>;
    async fn get_match(&self, id: Uuid) -> StoreResult<Option<Match>>;
    async fn list_matches(&self) -> StoreResult<Vec<Match>>;

    // --- solicitações de entradas ---
    async fn create_request(&self, request: TicketRequest) -> StoreResult<TicketRequest>;
    async fn update_request(&self, request: TicketRequest) -> StoreResult<TicketRequest>;
    async fn get_request(&self, id: Uuid) -> StoreResult<Option<TicketRequest>>;
    async fn list_requests(&self, scope: Scope) -> StoreResult<Vec<TicketRequest>>;
    async fn create_allocation(&self, alloc: TicketAllocation) -> StoreResult<TicketAllocation>;
    async fn allocations_for_request(&self, request_id: Uuid)
    -> StoreResult<Vec<TicketAllocation>>;
    /// Soma das alocações de todas as solicitações atadas a um partido.
    async fn allocated_total_for_match(&self, match_id: Uuid) -> StoreResult<i64>;

    // --- produtos e pedidos ---
    async fn create_product(&self, product: Product) -> StoreResult<Product>;
    async fn get_product(&self, id: Uuid) -> StoreResult<Option<Product>>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn create_order(&self, order: Order, items: Vec<OrderItem>) -> StoreResult<Order>;
    async fn update_order(&self, order: Order) -> StoreResult<Order>;
    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>>;
    async fn list_orders(&self, scope: Scope) -> StoreResult<Vec<Order>>;
    async fn items_for_order(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>>;

    // --- auditoria (somente acréscimo) ---
    async fn append_audit(&self, action: AuditAction) -> StoreResult<AuditAction>;
    async fn list_audit(&self, scope: Scope) -> StoreResult<Vec<AuditAction>>;

    // --- conversas e mensagens ---
    async fn create_conversation(&self, conv: Conversation) -> StoreResult<Conversation>;
    async fn get_conversation(&self, id: Uuid) -> StoreResult<Option<Conversation>>;
    /// Conversas globais são visíveis para qualquer alcance; as de filial
    /// seguem a regra usual.
    async fn list_conversations(&self, scope: Scope) -> StoreResult<Vec<Conversation>>;
    async fn create_message(&self, message: Message) -> StoreResult<Message>;
    async fn get_message(&self, id: Uuid) -> StoreResult<Option<Message>>;
    async fn list_messages(&self, conversation_id: Uuid) -> StoreResult<Vec<Message>>;
    async fn mark_message_read(&self, message_id: Uuid, user_id: Uuid) -> StoreResult<Message>;
}
