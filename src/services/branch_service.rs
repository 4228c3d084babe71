// src/services/branch_service.rs
//
// Cadastro de filiales e das suas autoridades. A troca de autoridade não
// apaga a anterior: fecha a vigência da ativa e cria uma nova, mantendo o
// histórico do cargo.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{ActionKind, ClientMeta},
        auth::AuthContext,
        branch::{
            Authority, Branch, CreateAuthorityPayload, CreateBranchPayload, UpdateBranchPayload,
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
pub struct BranchService {
    store: Arc<dyn Store>,
    audit: AuditService,
    notifier: Arc<Notifier>,
}

impl BranchService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService, notifier: Arc<Notifier>) -> Self {
        Self {
            store,
            audit,
            notifier,
        }
    }

    // --- Filiales ---

    pub async fn create_branch(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateBranchPayload,
    ) -> Result<Branch, AppError> {
        let now = Utc::now();
        let branch = self
            .store
            .create_branch(Branch {
                id: Uuid::new_v4(),
                code: payload.code,
                name: payload.name,
                description: payload.description,
                address: payload.address,
                city: payload.city,
                province: payload.province,
                country: payload.country,
                latitude: payload.latitude,
                longitude: payload.longitude,
                contact_email: payload.contact_email,
                contact_phone: payload.contact_phone,
                active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.audit
            .record(
                ctx,
                meta,
                "Branch",
                branch.id,
                ActionKind::Create,
                json!({ "code": branch.code, "name": branch.name }),
                Some(branch.id),
            )
            .await?;

        Ok(branch)
    }

    pub async fn update_branch(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        payload: UpdateBranchPayload,
    ) -> Result<Branch, AppError> {
        let mut branch = self
            .store
            .get_branch(id)
            .await?
            .ok_or(AppError::NotFound("Filial"))?;

        if let Some(name) = payload.name {
            branch.name = name;
        }
        if let Some(description) = payload.description {
            branch.description = description;
        }
        if let Some(address) = payload.address {
            branch.address = address;
        }
        if let Some(city) = payload.city {
            branch.city = city;
        }
        if let Some(province) = payload.province {
            branch.province = province;
        }
        if let Some(country) = payload.country {
            branch.country = country;
        }
        if let Some(latitude) = payload.latitude {
            branch.latitude = Some(latitude);
        }
        if let Some(longitude) = payload.longitude {
            branch.longitude = Some(longitude);
        }
        if let Some(contact_email) = payload.contact_email {
            branch.contact_email = Some(contact_email);
        }
        if let Some(contact_phone) = payload.contact_phone {
            branch.contact_phone = Some(contact_phone);
        }
        branch.updated_at = Utc::now();

        let branch = self.store.update_branch(branch).await?;

        self.audit
            .record(
                ctx,
                meta,
                "Branch",
                branch.id,
                ActionKind::Update,
                json!({ "name": branch.name }),
                Some(branch.id),
            )
            .await?;

        Ok(branch)
    }

    pub async fn list_branches(&self, ctx: &AuthContext) -> Result<Vec<Branch>, AppError> {
        Ok(self.store.list_branches(ctx.read_scope()).await?)
    }

    pub async fn get_branch(&self, ctx: &AuthContext, id: Uuid) -> Result<Branch, AppError> {
        self.store
            .get_branch(id)
            .await?
            .filter(|b| ctx.read_scope().allows(Some(b.id)))
            .ok_or(AppError::NotFound("Filial"))
    }

    /// Liga/desliga a filial sem apagar nada; o histórico fica intacto.
    pub async fn set_active(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        active: bool,
    ) -> Result<Branch, AppError> {
        let mut branch = self
            .store
            .get_branch(id)
            .await?
            .ok_or(AppError::NotFound("Filial"))?;

        branch.active = active;
        branch.updated_at = Utc::now();
        let branch = self.store.update_branch(branch).await?;

        let action = if active {
            ActionKind::Enable
        } else {
            ActionKind::Disable
        };
        self.audit
            .record(
                ctx,
                meta,
                "Branch",
                branch.id,
                action,
                json!({ "active": branch.active }),
                Some(branch.id),
            )
            .await?;

        self.notifier
            .dispatch_webhook(
                WebhookKind::Events,
                json!({
                    "event": if active { "branch_enabled" } else { "branch_disabled" },
                    "branchId": branch.id,
                    "code": branch.code,
                }),
            )
            .await;

        Ok(branch)
    }

    // --- Autoridades ---

    pub async fn create_authority(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateAuthorityPayload,
    ) -> Result<Authority, AppError> {
        let branch_id = resolve_target_branch(ctx, payload.branch_id)?;
        self.store
            .get_branch(branch_id)
            .await?
            .ok_or(AppError::Invalid("A filial informada não existe.".to_string()))?;

        let now = Utc::now();
        let current = self.store.active_authority(branch_id, payload.office).await?;

        let authority = self
            .store
            .create_authority(Authority {
                id: Uuid::new_v4(),
                branch_id,
                office: payload.office,
                person_name: payload.person_name,
                person_document: payload.person_document,
                email: payload.email,
                phone: payload.phone,
                since: payload.since,
                until: None,
                active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        // Se o cargo já tinha titular ativo, fecha a vigência dele na data
        // de posse do novo e registra a troca com os dois mandatos.
        if let Some(mut previous) = current {
            previous.active = false;
            previous.until = Some(payload.since);
            previous.updated_at = now;
            let superseded = self.store.update_authority(previous).await?;

            self.audit
                .record(
                    ctx,
                    meta,
                    "Authority",
                    authority.id,
                    ActionKind::ChangeAuthority,
                    json!({
                        "office": authority.office,
                        "previousId": superseded.id,
                        "newId": authority.id,
                        "until": superseded.until,
                    }),
                    Some(branch_id),
                )
                .await?;
        }

        self.audit
            .record(
                ctx,
                meta,
                "Authority",
                authority.id,
                ActionKind::Create,
                json!({
                    "office": authority.office,
                    "personName": authority.person_name,
                }),
                Some(authority.branch_id),
            )
            .await?;

        Ok(authority)
    }

    pub async fn list_authorities(&self, ctx: &AuthContext) -> Result<Vec<Authority>, AppError> {
        Ok(self.store.list_authorities(ctx.read_scope()).await?)
    }
}
