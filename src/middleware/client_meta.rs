// src/middleware/client_meta.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::models::audit::ClientMeta;

// Extrai IP (via X-Forwarded-For, primeiro salto) e User-Agent para a
// trilha de auditoria. Nunca falha: campos ausentes viram None.
pub struct ExtractClientMeta(pub ClientMeta);

impl<S> FromRequestParts<S> for ExtractClientMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Ok(ExtractClientMeta(ClientMeta { ip, user_agent }))
    }
}
