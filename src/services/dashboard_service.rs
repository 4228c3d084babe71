// src/services/dashboard_service.rs

use std::sync::Arc;

use serde::Serialize;

use crate::{
    common::error::AppError,
    models::{
        auth::AuthContext,
        orders::OrderState,
        tickets::RequestState,
    },
    store::Store,
};

// Totais agregados respeitando o alcance do chamador.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub branches: usize,
    pub active_authorities: usize,
    pub pending_requests: usize,
    pub pending_orders: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn Store>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn summary(&self, ctx: &AuthContext) -> Result<DashboardSummary, AppError> {
        let scope = ctx.read_scope();

        let branches = self.store.list_branches(scope).await?.len();
        let active_authorities = self
            .store
            .list_authorities(scope)
            .await?
            .iter()
            .filter(|a| a.active)
            .count();
        let pending_requests = self
            .store
            .list_requests(scope)
            .await?
            .iter()
            .filter(|r| r.state == RequestState::Pending)
            .count();
        let pending_orders = self
            .store
            .list_orders(scope)
            .await?
            .iter()
            .filter(|o| o.state == OrderState::Pending)
            .count();

        Ok(DashboardSummary {
            branches,
            active_authorities,
            pending_requests,
            pending_orders,
        })
    }
}
