// src/services/message_service.rs
//
// Conversas e mensagens da rede. Conversas de filial seguem o alcance de
// leitura normal; conversas globais aparecem para todo mundo, inclusive
// usuários sem filial.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{ActionKind, ClientMeta},
        auth::{AuthContext, Role},
        messages::{
            Conversation, CreateConversationPayload, CreateMessagePayload, Message, Visibility,
        },
    },
    services::audit::AuditService,
    store::Store,
};

#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn Store>,
    audit: AuditService,
}

impl MessageService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService) -> Self {
        Self { store, audit }
    }

    pub async fn create_conversation(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateConversationPayload,
    ) -> Result<Conversation, AppError> {
        let (visibility, branch_id) = match payload.visibility {
            // Só administradores abrem conversas globais.
            Visibility::Global => {
                if ctx.role != Role::Administrator {
                    return Err(AppError::Forbidden(
                        "Somente administradores podem criar conversas globais.".to_string(),
                    ));
                }
                (Visibility::Global, None)
            }
            Visibility::Branch => {
                let branch_id = ctx.branch_id.ok_or(AppError::Invalid(
                    "Conversas de filial exigem um usuário com filial associada.".to_string(),
                ))?;
                (Visibility::Branch, Some(branch_id))
            }
        };

        let now = Utc::now();
        let conversation = self
            .store
            .create_conversation(Conversation {
                id: Uuid::new_v4(),
                subject: payload.subject,
                created_by: ctx.user_id,
                visibility,
                branch_id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.audit
            .record(
                ctx,
                meta,
                "Conversation",
                conversation.id,
                ActionKind::Create,
                json!({ "subject": conversation.subject, "visibility": conversation.visibility }),
                conversation.branch_id,
            )
            .await?;

        Ok(conversation)
    }

    pub async fn list_conversations(
        &self,
        ctx: &AuthContext,
    ) -> Result<Vec<Conversation>, AppError> {
        Ok(self.store.list_conversations(ctx.read_scope()).await?)
    }

    pub async fn create_message(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateMessagePayload,
    ) -> Result<Message, AppError> {
        let conversation = self
            .conversation_visible_to(ctx, payload.conversation_id)
            .await?;

        let message = self
            .store
            .create_message(Message {
                id: Uuid::new_v4(),
                conversation_id: conversation.id,
                sender_id: ctx.user_id,
                text: payload.text,
                // Quem envia já leu.
                read_by: vec![ctx.user_id],
                created_at: Utc::now(),
            })
            .await?;

        self.audit
            .record(
                ctx,
                meta,
                "Message",
                message.id,
                ActionKind::Create,
                json!({ "conversationId": conversation.id }),
                conversation.branch_id,
            )
            .await?;

        Ok(message)
    }

    pub async fn list_messages(
        &self,
        ctx: &AuthContext,
        conversation_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        self.conversation_visible_to(ctx, conversation_id).await?;
        Ok(self.store.list_messages(conversation_id).await?)
    }

    /// Marca a mensagem como lida pelo chamador. Idempotente.
    pub async fn mark_read(&self, ctx: &AuthContext, message_id: Uuid) -> Result<Message, AppError> {
        let message = self
            .store
            .get_message(message_id)
            .await?
            .ok_or(AppError::NotFound("Mensagem"))?;
        self.conversation_visible_to(ctx, message.conversation_id)
            .await?;

        Ok(self.store.mark_message_read(message_id, ctx.user_id).await?)
    }

    async fn conversation_visible_to(
        &self,
        ctx: &AuthContext,
        conversation_id: Uuid,
    ) -> Result<Conversation, AppError> {
        self.store
            .get_conversation(conversation_id)
            .await?
            .filter(|c| {
                c.visibility == Visibility::Global
                    || ctx.read_scope().allows(c.branch_id)
            })
            .ok_or(AppError::NotFound("Conversa"))
    }
}
