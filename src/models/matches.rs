// src/models/matches.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Closed,
    Cancelled,
}

// Um evento com capacidade total opcional e contador de capacidade restante.
// Invariantes: remaining <= total; remaining decresce conforme alocações são
// aprovadas, com piso em zero. `capacity_total = None` significa sem limite.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub description: String,
    pub status: MatchStatus,
    pub capacity_total: Option<i64>,
    pub capacity_remaining: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Baixa a capacidade restante, com piso em zero. No-op sem capacidade.
    pub fn consume_capacity(&mut self, allocated: i64) {
        let Some(total) = self.capacity_total else {
            return;
        };
        let remaining = self.capacity_remaining.unwrap_or(total);
        self.capacity_remaining = Some((remaining - allocated).max(0));
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, message = "O local é obrigatório."))]
    pub venue: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "A capacidade não pode ser negativa."))]
    pub capacity_total: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchPayload {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub status: Option<MatchStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partido(total: Option<i64>, remaining: Option<i64>) -> Match {
        Match {
            id: Uuid::new_v4(),
            title: "Estudiantes vs Boca".into(),
            date: Utc::now(),
            venue: "Estadio UNO".into(),
            description: String::new(),
            status: MatchStatus::Scheduled,
            capacity_total: total,
            capacity_remaining: remaining,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn consume_capacity_floors_at_zero() {
        let mut m = partido(Some(10), Some(3));
        m.consume_capacity(8);
        assert_eq!(m.capacity_remaining, Some(0));
    }

    #[test]
    fn consume_capacity_without_limit_is_noop() {
        let mut m = partido(None, None);
        m.consume_capacity(50);
        assert_eq!(m.capacity_remaining, None);
    }

    #[test]
    fn consume_capacity_initializes_from_total() {
        let mut m = partido(Some(10), None);
        m.consume_capacity(4);
        assert_eq!(m.capacity_remaining, Some(6));
    }
}
