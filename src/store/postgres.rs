// src/store/postgres.rs
//
// Implementação durável do `Store` sobre Postgres (sqlx). As consultas usam
// `query_as`/`query_scalar` com bind posicional; enums são gravados como TEXT
// e o payload de auditoria como JSONB. Escritas multi-linha (pedido + itens)
// rodam dentro de uma transação.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    audit::AuditAction,
    auth::{Profile, Scope, User},
    branch::{Authority, Branch, Office},
    matches::Match,
    messages::{Conversation, Message},
    orders::{Order, OrderItem, Product},
    tickets::{TicketAllocation, TicketRequest},
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// Converte violação de unicidade em conflito legível; o resto segue como
// erro de banco.
fn map_unique(err: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(message.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    // --- usuários e perfis ---

    async fn create_user(&self, user: User) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "Nome de usuário ou e-mail já está em uso."))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_profile(&self, profile: Profile) -> StoreResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, user_id, role, branch_id, is_member, member_number,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(profile.role)
        .bind(profile.branch_id)
        .bind(profile.is_member)
        .bind(&profile.member_number)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "O usuário já possui um perfil associado."))
    }

    async fn profile_for_user(&self, user_id: Uuid) -> StoreResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    // --- filiais ---

    async fn create_branch(&self, branch: Branch) -> StoreResult<Branch> {
        sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (id, code, name, description, address, city, province,
                                  country, latitude, longitude, contact_email, contact_phone,
                                  active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(branch.id)
        .bind(&branch.code)
        .bind(&branch.name)
        .bind(&branch.description)
        .bind(&branch.address)
        .bind(&branch.city)
        .bind(&branch.province)
        .bind(&branch.country)
        .bind(branch.latitude)
        .bind(branch.longitude)
        .bind(&branch.contact_email)
        .bind(&branch.contact_phone)
        .bind(branch.active)
        .bind(branch.created_at)
        .bind(branch.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "Já existe uma filial com esse código."))
    }

    async fn update_branch(&self, branch: Branch) -> StoreResult<Branch> {
        sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches
            SET name = $2, description = $3, address = $4, city = $5, province = $6,
                country = $7, latitude = $8, longitude = $9, contact_email = $10,
                contact_phone = $11, active = $12, updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(branch.id)
        .bind(&branch.name)
        .bind(&branch.description)
        .bind(&branch.address)
        .bind(&branch.city)
        .bind(&branch.province)
        .bind(&branch.country)
        .bind(branch.latitude)
        .bind(branch.longitude)
        .bind(&branch.contact_email)
        .bind(&branch.contact_phone)
        .bind(branch.active)
        .bind(branch.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Filial"))
    }

    async fn get_branch(&self, id: Uuid) -> StoreResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(branch)
    }

    async fn list_branches(&self, scope: Scope) -> StoreResult<Vec<Branch>> {
        let branches = match scope {
            Scope::All => {
                sqlx::query_as::<_, Branch>("SELECT * FROM branches ORDER BY name ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Branch(id) => {
                sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Nothing => Vec::new(),
        };
        Ok(branches)
    }

    // --- autoridades ---

    async fn create_authority(&self, authority: Authority) -> StoreResult<Authority> {
        sqlx::query_as::<_, Authority>(
            r#"
            INSERT INTO authorities (id, branch_id, office, person_name, person_document,
                                     email, phone, since, until, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(authority.id)
        .bind(authority.branch_id)
        .bind(authority.office)
        .bind(&authority.person_name)
        .bind(&authority.person_document)
        .bind(&authority.email)
        .bind(&authority.phone)
        .bind(authority.since)
        .bind(authority.until)
        .bind(authority.active)
        .bind(authority.created_at)
        .bind(authority.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn update_authority(&self, authority: Authority) -> StoreResult<Authority> {
        sqlx::query_as::<_, Authority>(
            r#"
            UPDATE authorities
            SET person_name = $2, person_document = $3, email = $4, phone = $5,
                since = $6, until = $7, active = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(authority.id)
        .bind(&authority.person_name)
        .bind(&authority.person_document)
        .bind(&authority.email)
        .bind(&authority.phone)
        .bind(authority.since)
        .bind(authority.until)
        .bind(authority.active)
        .bind(authority.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Autoridade"))
    }

    async fn list_authorities(&self, scope: Scope) -> StoreResult<Vec<Authority>> {
        let authorities = match scope {
            Scope::All => {
                sqlx::query_as::<_, Authority>(
                    "SELECT * FROM authorities ORDER BY person_name ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Branch(id) => {
                sqlx::query_as::<_, Authority>(
                    "SELECT * FROM authorities WHERE branch_id = $1 ORDER BY person_name ASC",
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => Vec::new(),
        };
        Ok(authorities)
    }

    async fn active_authority(
        &self,
        branch_id: Uuid,
        office: Office,
    ) -> StoreResult<Option<Authority>> {
        let authority = sqlx::query_as::<_, Authority>(
            "SELECT * FROM authorities WHERE branch_id = $1 AND office = $2 AND active",
        )
        .bind(branch_id)
        .bind(office)
        .fetch_optional(&self.pool)
        .await?;
        Ok(authority)
    }

    // --- partidos ---

    async fn create_match(&self, m: Match) -> StoreResult<Match> {
        sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (id, title, date, venue, description, status,
                                 capacity_total, capacity_remaining, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(m.id)
        .bind(&m.title)
        .bind(m.date)
        .bind(&m.venue)
        .bind(&m.description)
        .bind(m.status)
        .bind(m.capacity_total)
        .bind(m.capacity_remaining)
        .bind(m.created_at)
        .bind(m.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn update_match(&self, m: Match) -> StoreResult<Match> {
        sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET title = $2, date = $3, venue = $4, description = $5, status = $6,
                capacity_total = $7, capacity_remaining = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(m.id)
        .bind(&m.title)
        .bind(m.date)
        .bind(&m.venue)
        .bind(&m.description)
        .bind(m.status)
        .bind(m.capacity_total)
        .bind(m.capacity_remaining)
        .bind(m.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Partido"))
    }

    async fn get_match(&self, id: Uuid) -> StoreResult<Option<Match>> {
        let partido = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(partido)
    }

    async fn list_matches(&self) -> StoreResult<Vec<Match>> {
        let matches = sqlx::query_as::<_, Match>("SELECT * FROM matches ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(matches)
    }

    // --- solicitações de entradas ---

    async fn create_request(&self, request: TicketRequest) -> StoreResult<TicketRequest> {
        sqlx::query_as::<_, TicketRequest>(
            r#"
            INSERT INTO ticket_requests (id, branch_id, match_id, requested_by,
                                         quantity_requested, state, observations,
                                         created_at, updated_at, resolved_at, resolved_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(request.branch_id)
        .bind(request.match_id)
        .bind(request.requested_by)
        .bind(request.quantity_requested)
        .bind(request.state)
        .bind(&request.observations)
        .bind(request.created_at)
        .bind(request.updated_at)
        .bind(request.resolved_at)
        .bind(request.resolved_by)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn update_request(&self, request: TicketRequest) -> StoreResult<TicketRequest> {
        sqlx::query_as::<_, TicketRequest>(
            r#"
            UPDATE ticket_requests
            SET state = $2, observations = $3, updated_at = $4, resolved_at = $5,
                resolved_by = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(request.state)
        .bind(&request.observations)
        .bind(request.updated_at)
        .bind(request.resolved_at)
        .bind(request.resolved_by)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Solicitação"))
    }

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<TicketRequest>> {
        let request =
            sqlx::query_as::<_, TicketRequest>("SELECT * FROM ticket_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(request)
    }

    async fn list_requests(&self, scope: Scope) -> StoreResult<Vec<TicketRequest>> {
        let requests = match scope {
            Scope::All => {
                sqlx::query_as::<_, TicketRequest>(
                    "SELECT * FROM ticket_requests ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Branch(id) => {
                sqlx::query_as::<_, TicketRequest>(
                    "SELECT * FROM ticket_requests WHERE branch_id = $1 ORDER BY created_at DESC",
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => Vec::new(),
        };
        Ok(requests)
    }

    async fn create_allocation(&self, alloc: TicketAllocation) -> StoreResult<TicketAllocation> {
        sqlx::query_as::<_, TicketAllocation>(
            r#"
            INSERT INTO ticket_allocations (id, request_id, quantity, allocated_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(alloc.id)
        .bind(alloc.request_id)
        .bind(alloc.quantity)
        .bind(alloc.allocated_by)
        .bind(alloc.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn allocations_for_request(
        &self,
        request_id: Uuid,
    ) -> StoreResult<Vec<TicketAllocation>> {
        let allocations = sqlx::query_as::<_, TicketAllocation>(
            "SELECT * FROM ticket_allocations WHERE request_id = $1 ORDER BY created_at ASC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(allocations)
    }

    async fn allocated_total_for_match(&self, match_id: Uuid) -> StoreResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(a.quantity), 0)::BIGINT
            FROM ticket_allocations a
            JOIN ticket_requests r ON r.id = a.request_id
            WHERE r.match_id = $1
            "#,
        )
        .bind(match_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    // --- produtos e pedidos ---

    async fn create_product(&self, product: Product) -> StoreResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, sku, category, unit, description, active,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.category)
        .bind(&product.unit)
        .bind(&product.description)
        .bind(product.active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "Já existe um produto com esse SKU."))
    }

    async fn get_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn create_order(&self, order: Order, items: Vec<OrderItem>) -> StoreResult<Order> {
        // Pedido e itens nascem juntos ou não nascem.
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, branch_id, state, observations, created_by,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.branch_id)
        .bind(order.state)
        .bind(&order.observations)
        .bind(order.created_by)
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, quantity, detail)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id)
            .bind(item.order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(&item.detail)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update_order(&self, order: Order) -> StoreResult<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET state = $2, observations = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.state)
        .bind(&order.observations)
        .bind(order.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Pedido"))
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    async fn list_orders(&self, scope: Scope) -> StoreResult<Vec<Order>> {
        let orders = match scope {
            Scope::All => {
                sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Branch(id) => {
                sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE branch_id = $1 ORDER BY created_at DESC",
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => Vec::new(),
        };
        Ok(orders)
    }

    async fn items_for_order(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
        let items =
            sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    // --- auditoria ---

    async fn append_audit(&self, action: AuditAction) -> StoreResult<AuditAction> {
        sqlx::query_as::<_, AuditAction>(
            r#"
            INSERT INTO audit_actions (id, actor_id, branch_id, resource, resource_id,
                                       action, payload, ip, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(action.id)
        .bind(action.actor_id)
        .bind(action.branch_id)
        .bind(&action.resource)
        .bind(&action.resource_id)
        .bind(action.action)
        .bind(&action.payload)
        .bind(&action.ip)
        .bind(&action.user_agent)
        .bind(action.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn list_audit(&self, scope: Scope) -> StoreResult<Vec<AuditAction>> {
        let actions = match scope {
            Scope::All => {
                sqlx::query_as::<_, AuditAction>(
                    "SELECT * FROM audit_actions ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Branch(id) => {
                sqlx::query_as::<_, AuditAction>(
                    "SELECT * FROM audit_actions WHERE branch_id = $1 ORDER BY created_at DESC",
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => Vec::new(),
        };
        Ok(actions)
    }

    // --- conversas e mensagens ---

    async fn create_conversation(&self, conv: Conversation) -> StoreResult<Conversation> {
        sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (id, subject, created_by, visibility, branch_id,
                                       created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(conv.id)
        .bind(&conv.subject)
        .bind(conv.created_by)
        .bind(conv.visibility)
        .bind(conv.branch_id)
        .bind(conv.created_at)
        .bind(conv.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn get_conversation(&self, id: Uuid) -> StoreResult<Option<Conversation>> {
        let conv = sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(conv)
    }

    async fn list_conversations(&self, scope: Scope) -> StoreResult<Vec<Conversation>> {
        // Conversas globais são visíveis para qualquer papel autenticado.
        let conversations = match scope {
            Scope::All => {
                sqlx::query_as::<_, Conversation>(
                    "SELECT * FROM conversations ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Branch(id) => {
                sqlx::query_as::<_, Conversation>(
                    r#"
                    SELECT * FROM conversations
                    WHERE visibility = 'GLOBAL' OR branch_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => {
                sqlx::query_as::<_, Conversation>(
                    "SELECT * FROM conversations WHERE visibility = 'GLOBAL' ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(conversations)
    }

    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, conversation_id, sender_id, text, read_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(message.sender_id)
        .bind(&message.text)
        .bind(&message.read_by)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Database)
    }

    async fn get_message(&self, id: Uuid) -> StoreResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message)
    }

    async fn list_messages(&self, conversation_id: Uuid) -> StoreResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn mark_message_read(&self, message_id: Uuid, user_id: Uuid) -> StoreResult<Message> {
        // Releitura é idempotente: o UPDATE só acrescenta quando ainda falta.
        sqlx::query(
            r#"
            UPDATE messages
            SET read_by = array_append(read_by, $2)
            WHERE id = $1 AND NOT ($2 = ANY(read_by))
            "#,
        )
        .bind(message_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.get_message(message_id)
            .await?
            .ok_or(StoreError::NotFound("Mensagem"))
    }
}
