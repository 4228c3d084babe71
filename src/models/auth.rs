// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Papel de um perfil dentro da rede de filiais
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    Coordinator,
    BranchUser,
}

impl Role {
    /// Tabela de política de leitura: cada papel resolve para um único alcance.
    pub fn read_scope(&self, branch_id: Option<Uuid>) -> Scope {
        match self {
            Role::Administrator | Role::Coordinator => Scope::All,
            Role::BranchUser => match branch_id {
                Some(id) => Scope::Branch(id),
                None => Scope::Nothing,
            },
        }
    }

    /// Coordenadores têm leitura global mas nunca escrevem.
    pub fn can_write(&self) -> bool {
        !matches!(self, Role::Coordinator)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

// Alcance de consulta derivado do papel do chamador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Branch(Uuid),
    Nothing,
}

impl Scope {
    /// Decide se um registro associado (ou não) a uma filial é visível.
    pub fn allows(&self, record_branch: Option<Uuid>) -> bool {
        match self {
            Scope::All => true,
            Scope::Branch(id) => record_branch == Some(*id),
            Scope::Nothing => false,
        }
    }
}

// Extensão 1:1 do usuário com papel e filial opcional
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub branch_id: Option<Uuid>,
    pub is_member: bool,
    pub member_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Objeto de capacidade montado pelo middleware e passado aos serviços.
// Nenhum serviço consulta um "usuário ambiente": tudo que importa está aqui.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub branch_id: Option<Uuid>,
}

impl AuthContext {
    pub fn read_scope(&self) -> Scope {
        self.role.read_scope(self.branch_id)
    }
}

// Dados para registro de um novo usuário de filial
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub branch_id: Option<Uuid>,
}

// Dados para criação administrativa de usuários (qualquer papel)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub role: Role,
    pub branch_id: Option<Uuid>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

// Resposta de /users/me: usuário + perfil
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
    pub profile: Profile,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_coordinator_read_everything() {
        assert_eq!(Role::Administrator.read_scope(None), Scope::All);
        assert_eq!(Role::Coordinator.read_scope(Some(Uuid::new_v4())), Scope::All);
    }

    #[test]
    fn branch_user_is_confined_to_its_branch() {
        let branch = Uuid::new_v4();
        let scope = Role::BranchUser.read_scope(Some(branch));
        assert_eq!(scope, Scope::Branch(branch));
        assert!(scope.allows(Some(branch)));
        assert!(!scope.allows(Some(Uuid::new_v4())));
        assert!(!scope.allows(None));
    }

    #[test]
    fn branch_user_without_branch_sees_nothing() {
        let scope = Role::BranchUser.read_scope(None);
        assert_eq!(scope, Scope::Nothing);
        assert!(!scope.allows(Some(Uuid::new_v4())));
    }

    #[test]
    fn coordinator_never_writes() {
        assert!(Role::Administrator.can_write());
        assert!(!Role::Coordinator.can_write());
        assert!(Role::BranchUser.can_write());
    }
}
