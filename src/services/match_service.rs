// src/services/match_service.rs

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{ActionKind, ClientMeta},
        auth::AuthContext,
        matches::{CreateMatchPayload, Match, MatchStatus, UpdateMatchPayload},
    },
    services::audit::AuditService,
    store::Store,
};

#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn Store>,
    audit: AuditService,
}

impl MatchService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService) -> Self {
        Self { store, audit }
    }

    pub async fn create_match(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        payload: CreateMatchPayload,
    ) -> Result<Match, AppError> {
        let now = Utc::now();
        let partido = self
            .store
            .create_match(Match {
                id: Uuid::new_v4(),
                title: payload.title,
                date: payload.date,
                venue: payload.venue,
                description: payload.description,
                status: MatchStatus::Scheduled,
                capacity_total: payload.capacity_total,
                // O saldo nasce igual ao total; partidas sem limite ficam
                // com ambos em NULL.
                capacity_remaining: payload.capacity_total,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.audit
            .record(
                ctx,
                meta,
                "Match",
                partido.id,
                ActionKind::Create,
                json!({
                    "title": partido.title,
                    "capacityTotal": partido.capacity_total,
                }),
                None,
            )
            .await?;

        Ok(partido)
    }

    pub async fn update_match(
        &self,
        ctx: &AuthContext,
        meta: &ClientMeta,
        id: Uuid,
        payload: UpdateMatchPayload,
    ) -> Result<Match, AppError> {
        let mut partido = self
            .store
            .get_match(id)
            .await?
            .ok_or(AppError::NotFound("Partido"))?;

        if let Some(title) = payload.title {
            partido.title = title;
        }
        if let Some(date) = payload.date {
            partido.date = date;
        }
        if let Some(venue) = payload.venue {
            partido.venue = venue;
        }
        if let Some(description) = payload.description {
            partido.description = description;
        }
        if let Some(status) = payload.status {
            partido.status = status;
        }
        partido.updated_at = Utc::now();

        let partido = self.store.update_match(partido).await?;

        self.audit
            .record(
                ctx,
                meta,
                "Match",
                partido.id,
                ActionKind::Update,
                json!({ "status": partido.status }),
                None,
            )
            .await?;

        Ok(partido)
    }

    // Partidos são visíveis para qualquer usuário autenticado.
    pub async fn list_matches(&self) -> Result<Vec<Match>, AppError> {
        Ok(self.store.list_matches().await?)
    }

    pub async fn get_match(&self, id: Uuid) -> Result<Match, AppError> {
        self.store
            .get_match(id)
            .await?
            .ok_or(AppError::NotFound("Partido"))
    }
}
