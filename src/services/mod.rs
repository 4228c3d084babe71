// src/services/mod.rs

pub mod audit;
pub mod auth;
pub mod branch_service;
pub mod dashboard_service;
pub mod match_service;
pub mod message_service;
pub mod notifier;
pub mod order_service;
pub mod ticket_service;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AuthContext, Role},
};

/// Resolve a filial alvo de uma criação: usuários de filial sempre operam
/// na própria filial (o corpo é ignorado); os demais papéis devem indicar
/// a filial explicitamente.
pub(crate) fn resolve_target_branch(
    ctx: &AuthContext,
    requested: Option<Uuid>,
) -> Result<Uuid, AppError> {
    match ctx.role {
        Role::BranchUser => ctx.branch_id.ok_or(AppError::Forbidden(
            "Usuário de filial sem filial associada.".to_string(),
        )),
        _ => requested.ok_or(AppError::Invalid(
            "A filial é obrigatória.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role, branch_id: Option<Uuid>) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            username: "teste".into(),
            role,
            branch_id,
        }
    }

    #[test]
    fn branch_user_always_targets_its_own_branch() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let resolved = resolve_target_branch(&ctx(Role::BranchUser, Some(own)), Some(other));
        assert_eq!(resolved.unwrap(), own);
    }

    #[test]
    fn branch_user_without_branch_is_rejected() {
        assert!(resolve_target_branch(&ctx(Role::BranchUser, None), None).is_err());
    }

    #[test]
    fn administrator_must_name_a_branch() {
        let target = Uuid::new_v4();
        let resolved = resolve_target_branch(&ctx(Role::Administrator, None), Some(target));
        assert_eq!(resolved.unwrap(), target);
        assert!(resolve_target_branch(&ctx(Role::Administrator, None), None).is_err());
    }
}
