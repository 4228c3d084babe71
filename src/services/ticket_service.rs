// src/services/ticket_service.rs
//
// O coração do fluxo: solicitação de entradas e sua aprovação com controle
// de cota. A sequência de aprovação (validar → gravar alocação → baixar
// capacidade → mudar estado → auditar → notificar) roda em ordem de
// programa dentro da requisição; a checagem de cota é leitura-depois-escrita
// sem lock, então aprovações concorrentes sobre o mesmo partido podem
// disputar o agregado (comportamento herdado do sistema original).

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{ActionKind, ClientMeta},
        auth::AuthContext,
        tickets::{
            ApproveRequestPayload, CreateRequestPayload, RejectRequestPayload, RequestDetail,
            RequestState, TicketAllocation, TicketRequest,
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
pub struct TicketService {
    store: Arc<dyn Store>,
    audit: AuditService,
    notifier: Arc<Notifier>,
}

impl TicketService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService, notifier: Arc<Notifier>) -> Self {
        Self {
            store,
            audit,
            notifier,
        }
    }

    pub async fn create_request(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateRequestPayload,
    ) -> Result<TicketRequest, AppError> {
        // Usuário de filial sempre cria na própria filial, não importa o
        // que o cliente mandou no corpo.
        let branch_id = resolve_target_branch(ctx, payload.branch_id)?;

        self.store
            .get_match(payload.match_id)
            .await?
            .ok_or(AppError::Invalid("O partido informado não existe.".to_string()))?;
        self.store
            .get_branch(branch_id)
            .await?
            .ok_or(AppError::Invalid("A filial informada não existe.".to_string()))?;

        let now = Utc::now();
        let request = self
            .store
            .create_request(TicketRequest {
                id: Uuid::new_v4(),
                branch_id,
                match_id: payload.match_id,
                requested_by: ctx.user_id,
                quantity_requested: payload.quantity_requested,
                state: RequestState::Pending,
                observations: payload.observations,
                created_at: now,
                updated_at: now,
                resolved_at: None,
                resolved_by: None,
            })
            .await?;

        self.audit
            .record(
                ctx,
                meta,
                "TicketRequest",
                request.id,
                ActionKind::Create,
                json!({ "quantityRequested": request.quantity_requested }),
                Some(branch_id),
            )
            .await?;

        Ok(request)
    }

    pub async fn list_requests(&self, ctx: &AuthContext) -> Result<Vec<TicketRequest>, AppError> {
        Ok(self.store.list_requests(ctx.read_scope()).await?)
    }

    pub async fn get_request(
        &self,
        ctx: &AuthContext,
        id: Uuid,
    ) -> Result<RequestDetail, AppError> {
        let request = self
            .store
            .get_request(id)
            .await?
            .filter(|r| ctx.read_scope().allows(Some(r.branch_id)))
            .ok_or(AppError::NotFound("Solicitação"))?;
        let allocations = self.store.allocations_for_request(id).await?;
        Ok(RequestDetail {
            request,
            allocations,
        })
    }

    /// Aprovação (possivelmente parcial) de uma solicitação. Só
    /// administradores chegam aqui; o guard de rota barra o resto.
    pub async fn approve(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        payload: ApproveRequestPayload,
    ) -> Result<RequestDetail, AppError> {
        let mut request = self
            .store
            .get_request(id)
            .await?
            .ok_or(AppError::NotFound("Solicitação"))?;

        // Aprovação só sai de pendente ou de parcial (complemento).
        if !matches!(
            request.state,
            RequestState::Pending | RequestState::PartiallyApproved
        ) {
            return Err(AppError::Invalid(
                "A solicitação já foi resolvida e não aceita novas aprovações.".to_string(),
            ));
        }

        let quantity = payload.allocated_quantity;

        // Invariante por solicitação: alocado nunca passa do solicitado.
        let already_allocated: i64 = self
            .store
            .allocations_for_request(id)
            .await?
            .iter()
            .map(|a| a.quantity)
            .sum();
        if already_allocated + quantity > request.quantity_requested {
            return Err(AppError::Invalid(
                "A quantidade alocada excede a quantidade solicitada.".to_string(),
            ));
        }

        // Invariante por partido: a soma das alocações de todas as
        // solicitações não passa da capacidade total (quando finita).
        let mut partido = self
            .store
            .get_match(request.match_id)
            .await?
            .ok_or(AppError::NotFound("Partido"))?;
        if let Some(capacity_total) = partido.capacity_total {
            let match_total = self.store.allocated_total_for_match(partido.id).await?;
            if match_total + quantity > capacity_total {
                return Err(AppError::Invalid(
                    "A cota de entradas do partido foi excedida.".to_string(),
                ));
            }
        }

        let now = Utc::now();
        let allocation = self
            .store
            .create_allocation(TicketAllocation {
                id: Uuid::new_v4(),
                request_id: request.id,
                quantity,
                allocated_by: ctx.user_id,
                created_at: now,
            })
            .await?;

        partido.consume_capacity(quantity);
        partido.updated_at = now;
        let partido = self.store.update_match(partido).await?;

        request.state = if already_allocated + quantity == request.quantity_requested {
            RequestState::Approved
        } else {
            RequestState::PartiallyApproved
        };
        if let Some(comment) = payload.comment {
            request.observations = comment;
        }
        request.resolved_at = Some(now);
        request.resolved_by = Some(ctx.user_id);
        request.updated_at = now;
        let request = self.store.update_request(request).await?;

        // Dois registros distintos: a aprovação e a criação da alocação.
        self.audit
            .record(
                ctx,
                meta,
                "TicketRequest",
                request.id,
                ActionKind::Approve,
                json!({
                    "allocatedQuantity": quantity,
                    "state": request.state,
                }),
                Some(request.branch_id),
            )
            .await?;
        self.audit
            .record(
                ctx,
                meta,
                "TicketAllocation",
                allocation.id,
                ActionKind::AssignTickets,
                json!({
                    "requestId": request.id,
                    "quantity": allocation.quantity,
                }),
                Some(request.branch_id),
            )
            .await?;

        self.notify_branch(
            &request,
            "Solicitação de entradas aprovada",
            &format!(
                "A solicitação {} foi aprovada com {} entradas.",
                request.id, quantity
            ),
            json!({
                "event": "request_approved",
                "requestId": request.id,
                "state": request.state,
                "allocatedQuantity": quantity,
                "capacityRemaining": partido.capacity_remaining,
            }),
        )
        .await;

        let allocations = self.store.allocations_for_request(request.id).await?;
        Ok(RequestDetail {
            request,
            allocations,
        })
    }

    /// Rejeição: derruba para `Rejected` seja qual for o estado anterior,
    /// sem tocar em cota nem criar alocação.
    pub async fn reject(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        payload: RejectRequestPayload,
    ) -> Result<RequestDetail, AppError> {
        let mut request = self
            .store
            .get_request(id)
            .await?
            .ok_or(AppError::NotFound("Solicitação"))?;

        let now = Utc::now();
        request.state = RequestState::Rejected;
        if let Some(motive) = payload.motive.clone() {
            request.observations = motive;
        }
        request.resolved_at = Some(now);
        request.resolved_by = Some(ctx.user_id);
        request.updated_at = now;
        let request = self.store.update_request(request).await?;

        self.audit
            .record(
                ctx,
                meta,
                "TicketRequest",
                request.id,
                ActionKind::Reject,
                json!({ "motive": payload.motive }),
                Some(request.branch_id),
            )
            .await?;

        self.notify_branch(
            &request,
            "Solicitação de entradas rejeitada",
            &format!("A solicitação {} foi rejeitada.", request.id),
            json!({
                "event": "request_rejected",
                "requestId": request.id,
                "state": request.state,
                "motive": payload.motive,
            }),
        )
        .await;

        let allocations = self.store.allocations_for_request(request.id).await?;
        Ok(RequestDetail {
            request,
            allocations,
        })
    }

    // E-mail para o contato da filial (quando houver) + webhook de eventos.
    async fn notify_branch(
        &self,
        request: &TicketRequest,
        subject: &str,
        body: &str,
        payload: serde_json::Value,
    ) {
        if let Ok(Some(branch)) = self.store.get_branch(request.branch_id).await {
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
