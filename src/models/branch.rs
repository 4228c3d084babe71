// src/models/branch.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Uma filial da organização. Nunca é removida fisicamente pela API:
// o ciclo de vida é criação + habilitar/desabilitar.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Cargo de uma autoridade de filial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Office {
    President,
    Secretary,
    Treasurer,
    Vocal,
}

// Mandato de uma autoridade: vínculo pessoa/cargo/filial com janela de validade.
// Só existe uma autoridade ativa por cargo em cada filial; criar outra
// substitui a anterior (desativa e carimba a data de término).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Authority {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub office: Office,
    pub person_name: String,
    pub person_document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub since: NaiveDate,
    pub until: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    pub address: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: String,
    #[validate(length(min = 1, message = "A província é obrigatória."))]
    pub province: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    #[validate(email(message = "O e-mail de contato é inválido."))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

fn default_country() -> String {
    "Argentina".to_string()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    #[validate(email(message = "O e-mail de contato é inválido."))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorityPayload {
    // Ignorado para usuários de filial: o alcance força a filial do chamador.
    pub branch_id: Option<Uuid>,
    pub office: Office,
    #[validate(length(min = 1, message = "O nome da pessoa é obrigatório."))]
    pub person_name: String,
    pub person_document: Option<String>,
    #[validate(email(message = "O e-mail é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub since: NaiveDate,
}
