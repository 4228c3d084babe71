// src/store/memory.rs
//
// Implementação em memória do `Store`. Existe para testes e para rodar o
// backend localmente sem um Postgres configurado. Nada aqui é durável:
// todo o estado se perde quando o processo termina.
//
// Um único `RwLock` protege o estado inteiro: leituras concorrem entre si
// e as escritas são serializadas, o que preserva os invariantes sem
// coordenação mais fina (carga de dev/teste é pequena).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    audit::AuditAction,
    auth::{Profile, Scope, User},
    branch::{Authority, Branch, Office},
    matches::Match,
    messages::{Conversation, Message, Visibility},
    orders::{Order, OrderItem, Product},
    tickets::{TicketAllocation, TicketRequest},
};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, Profile>,
    branches: HashMap<Uuid, Branch>,
    authorities: HashMap<Uuid, Authority>,
    matches: HashMap<Uuid, Match>,
    requests: HashMap<Uuid, TicketRequest>,
    allocations: HashMap<Uuid, TicketAllocation>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, Order>,
    order_items: HashMap<Uuid, OrderItem>,
    audit: Vec<AuditAction>,
    conversations: HashMap<Uuid, Conversation>,
    messages: HashMap<Uuid, Message>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn branch_scope_filter(scope: Scope, branch_id: Option<Uuid>) -> bool {
    scope.allows(branch_id)
}

#[async_trait]
impl Store for MemoryStore {
    // --- usuários e perfis ---

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "O nome de usuário '{}' já está em uso.",
                user.username
            )));
        }
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "O e-mail '{}' já está em uso.",
                user.email
            )));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn create_profile(&self, profile: Profile) -> StoreResult<Profile> {
        let mut inner = self.inner.write().await;
        if inner.profiles.values().any(|p| p.user_id == profile.user_id) {
            return Err(StoreError::Conflict(
                "O usuário já possui um perfil associado.".to_string(),
            ));
        }
        inner.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn profile_for_user(&self, user_id: Uuid) -> StoreResult<Option<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    // --- filiais ---

    async fn create_branch(&self, branch: Branch) -> StoreResult<Branch> {
        let mut inner = self.inner.write().await;
        if inner.branches.values().any(|b| b.code == branch.code) {
            return Err(StoreError::Conflict(format!(
                "Já existe uma filial com o código '{}'.",
                branch.code
            )));
        }
        inner.branches.insert(branch.id, branch.clone());
        Ok(branch)
    }

    async fn update_branch(&self, branch: Branch) -> StoreResult<Branch> {
        let mut inner = self.inner.write().await;
        if !inner.branches.contains_key(&branch.id) {
            return Err(StoreError::NotFound("Filial"));
        }
        inner.branches.insert(branch.id, branch.clone());
        Ok(branch)
    }

    async fn get_branch(&self, id: Uuid) -> StoreResult<Option<Branch>> {
        let inner = self.inner.read().await;
        Ok(inner.branches.get(&id).cloned())
    }

    async fn list_branches(&self, scope: Scope) -> StoreResult<Vec<Branch>> {
        let inner = self.inner.read().await;
        let mut branches: Vec<Branch> = inner
            .branches
            .values()
            .filter(|b| branch_scope_filter(scope, Some(b.id)))
            .cloned()
            .collect();
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }

    // --- autoridades ---

    async fn create_authority(&self, authority: Authority) -> StoreResult<Authority> {
        let mut inner = self.inner.write().await;
        if !inner.branches.contains_key(&authority.branch_id) {
            return Err(StoreError::NotFound("Filial"));
        }
        inner.authorities.insert(authority.id, authority.clone());
        Ok(authority)
    }

    async fn update_authority(&self, authority: Authority) -> StoreResult<Authority> {
        let mut inner = self.inner.write().await;
        if !inner.authorities.contains_key(&authority.id) {
            return Err(StoreError::NotFound("Autoridade"));
        }
        inner.authorities.insert(authority.id, authority.clone());
        Ok(authority)
    }

    async fn list_authorities(&self, scope: Scope) -> StoreResult<Vec<Authority>> {
        let inner = self.inner.read().await;
        let mut authorities: Vec<Authority> = inner
            .authorities
            .values()
            .filter(|a| branch_scope_filter(scope, Some(a.branch_id)))
            .cloned()
            .collect();
        authorities.sort_by(|a, b| a.person_name.cmp(&b.person_name));
        Ok(authorities)
    }

    async fn active_authority(
        &self,
        branch_id: Uuid,
        office: Office,
    ) -> StoreResult<Option<Authority>> {
        let inner = self.inner.read().await;
        Ok(inner
            .authorities
            .values()
            .find(|a| a.branch_id == branch_id && a.office == office && a.active)
            .cloned())
    }

    // --- partidos ---

    async fn create_match(&self, m: Match) -> StoreResult<Match> {
        let mut inner = self.inner.write().await;
        inner.matches.insert(m.id, m.clone());
        Ok(m)
    }

    async fn update_match(&self, m: Match) -> StoreResult<Match> {
        let mut inner = self.inner.write().await;
        if !inner.matches.contains_key(&m.id) {
            return Err(StoreError::NotFound("Partido"));
        }
        inner.matches.insert(m.id, m.clone());
        Ok(m)
    }

    async fn get_match(&self, id: Uuid) -> StoreResult<Option<Match>> {
        let inner = self.inner.read().await;
        Ok(inner.matches.get(&id).cloned())
    }

    async fn list_matches(&self) -> StoreResult<Vec<Match>> {
        let inner = self.inner.read().await;
        let mut matches: Vec<Match> = inner.matches.values().cloned().collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matches)
    }

    // --- solicitações de entradas ---

    async fn create_request(&self, request: TicketRequest) -> StoreResult<TicketRequest> {
        let mut inner = self.inner.write().await;
        if !inner.branches.contains_key(&request.branch_id) {
            return Err(StoreError::NotFound("Filial"));
        }
        if !inner.matches.contains_key(&request.match_id) {
            return Err(StoreError::NotFound("Partido"));
        }
        inner.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update_request(&self, request: TicketRequest) -> StoreResult<TicketRequest> {
        let mut inner = self.inner.write().await;
        if !inner.requests.contains_key(&request.id) {
            return Err(StoreError::NotFound("Solicitação"));
        }
        inner.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<TicketRequest>> {
        let inner = self.inner.read().await;
        Ok(inner.requests.get(&id).cloned())
    }

    async fn list_requests(&self, scope: Scope) -> StoreResult<Vec<TicketRequest>> {
        let inner = self.inner.read().await;
        let mut requests: Vec<TicketRequest> = inner
            .requests
            .values()
            .filter(|r| branch_scope_filter(scope, Some(r.branch_id)))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn create_allocation(&self, alloc: TicketAllocation) -> StoreResult<TicketAllocation> {
        let mut inner = self.inner.write().await;
        if !inner.requests.contains_key(&alloc.request_id) {
            return Err(StoreError::NotFound("Solicitação"));
        }
        inner.allocations.insert(alloc.id, alloc.clone());
        Ok(alloc)
    }

    async fn allocations_for_request(
        &self,
        request_id: Uuid,
    ) -> StoreResult<Vec<TicketAllocation>> {
        let inner = self.inner.read().await;
        let mut allocations: Vec<TicketAllocation> = inner
            .allocations
            .values()
            .filter(|a| a.request_id == request_id)
            .cloned()
            .collect();
        allocations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(allocations)
    }

    async fn allocated_total_for_match(&self, match_id: Uuid) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        let total = inner
            .allocations
            .values()
            .filter(|a| {
                inner
                    .requests
                    .get(&a.request_id)
                    .is_some_and(|r| r.match_id == match_id)
            })
            .map(|a| a.quantity)
            .sum();
        Ok(total)
    }

    // --- produtos e pedidos ---

    async fn create_product(&self, product: Product) -> StoreResult<Product> {
        let mut inner = self.inner.write().await;
        if inner.products.values().any(|p| p.sku == product.sku) {
            return Err(StoreError::Conflict(format!(
                "Já existe um produto com o SKU '{}'.",
                product.sku
            )));
        }
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn create_order(&self, order: Order, items: Vec<OrderItem>) -> StoreResult<Order> {
        let mut inner = self.inner.write().await;
        if !inner.branches.contains_key(&order.branch_id) {
            return Err(StoreError::NotFound("Filial"));
        }
        for item in &items {
            if !inner.products.contains_key(&item.product_id) {
                return Err(StoreError::NotFound("Produto"));
            }
        }
        inner.orders.insert(order.id, order.clone());
        for item in items {
            inner.order_items.insert(item.id, item);
        }
        Ok(order)
    }

    async fn update_order(&self, order: Order) -> StoreResult<Order> {
        let mut inner = self.inner.write().await;
        if !inner.orders.contains_key(&order.id) {
            return Err(StoreError::NotFound("Pedido"));
        }
        inner.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let inner = self.inner.read().await;
        Ok(inner.orders.get(&id).cloned())
    }

    async fn list_orders(&self, scope: Scope) -> StoreResult<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| branch_scope_filter(scope, Some(o.branch_id)))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn items_for_order(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order_items
            .values()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    // --- auditoria ---

    async fn append_audit(&self, action: AuditAction) -> StoreResult<AuditAction> {
        let mut inner = self.inner.write().await;
        inner.audit.push(action.clone());
        Ok(action)
    }

    async fn list_audit(&self, scope: Scope) -> StoreResult<Vec<AuditAction>> {
        let inner = self.inner.read().await;
        let mut actions: Vec<AuditAction> = inner
            .audit
            .iter()
            .filter(|a| branch_scope_filter(scope, a.branch_id))
            .cloned()
            .collect();
        actions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(actions)
    }

    // --- conversas e mensagens ---

    async fn create_conversation(&self, conv: Conversation) -> StoreResult<Conversation> {
        let mut inner = self.inner.write().await;
        if let Some(branch_id) = conv.branch_id {
            if !inner.branches.contains_key(&branch_id) {
                return Err(StoreError::NotFound("Filial"));
            }
        }
        inner.conversations.insert(conv.id, conv.clone());
        Ok(conv)
    }

    async fn get_conversation(&self, id: Uuid) -> StoreResult<Option<Conversation>> {
        let inner = self.inner.read().await;
        Ok(inner.conversations.get(&id).cloned())
    }

    async fn list_conversations(&self, scope: Scope) -> StoreResult<Vec<Conversation>> {
        let inner = self.inner.read().await;
        let mut conversations: Vec<Conversation> = inner
            .conversations
            .values()
            .filter(|c| {
                c.visibility == Visibility::Global || branch_scope_filter(scope, c.branch_id)
            })
            .cloned()
            .collect();
        conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(conversations)
    }

    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        let mut inner = self.inner.write().await;
        if !inner.conversations.contains_key(&message.conversation_id) {
            return Err(StoreError::NotFound("Conversa"));
        }
        inner.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn get_message(&self, id: Uuid) -> StoreResult<Option<Message>> {
        let inner = self.inner.read().await;
        Ok(inner.messages.get(&id).cloned())
    }

    async fn list_messages(&self, conversation_id: Uuid) -> StoreResult<Vec<Message>> {
        let inner = self.inner.read().await;
        let mut messages: Vec<Message> = inner
            .messages
            .values()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn mark_message_read(&self, message_id: Uuid, user_id: Uuid) -> StoreResult<Message> {
        let mut inner = self.inner.write().await;
        let message = inner
            .messages
            .get_mut(&message_id)
            .ok_or(StoreError::NotFound("Mensagem"))?;
        if !message.read_by.contains(&user_id) {
            message.read_by.push(user_id);
        }
        Ok(message.clone())
    }
}
