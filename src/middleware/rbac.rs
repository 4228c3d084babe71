// src/middleware/rbac.rs
//
// Guardiões de papel na forma de extratores: a rota declara no próprio
// assinatura o que exige, em vez de cada handler repetir o mesmo `if`.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::auth::AuthContext,
};

/// Exige papel de administrador.
pub struct RequireAdmin(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if !ctx.role.is_admin() {
            return Err(AppError::Forbidden(
                "Esta operação exige papel de administrador.".to_string(),
            ));
        }

        Ok(RequireAdmin(ctx))
    }
}

/// Exige um papel com permissão de escrita (coordenadores só leem).
pub struct RequireWriter(pub AuthContext);

impl<S> FromRequestParts<S> for RequireWriter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if !ctx.role.can_write() {
            return Err(AppError::Forbidden(
                "O papel de coordenador é somente leitura.".to_string(),
            ));
        }

        Ok(RequireWriter(ctx))
    }
}
