// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AuthContext, Claims, MeResponse, Profile, Role, User},
    store::Store,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: String) -> Self {
        Self { store, jwt_secret }
    }

    /// Cria usuário e perfil em um único passo explícito. Não existe hook
    /// implícito criando perfis por trás da persistência: quem registra,
    /// registra os dois.
    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        branch_id: Option<Uuid>,
    ) -> Result<String, AppError> {
        // Invariante: usuário de filial exige filial associada. Vale para
        // todos os caminhos de criação, inclusive o administrativo.
        if role == Role::BranchUser && branch_id.is_none() {
            return Err(AppError::Invalid(
                "Usuários de filial devem ter uma filial associada.".to_string(),
            ));
        }
        if let Some(id) = branch_id {
            self.store
                .get_branch(id)
                .await?
                .ok_or(AppError::Invalid("A filial informada não existe.".to_string()))?;
        }

        // Hashing fora do executor async, como manda o bcrypt.
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let now = Utc::now();
        let new_user = self
            .store
            .create_user(User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hashed_password,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.store
            .create_profile(Profile {
                id: Uuid::new_v4(),
                user_id: new_user.id,
                role,
                branch_id,
                is_member: false,
                member_number: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    /// Decodifica o token e monta o objeto de capacidade que circula pelos
    /// handlers. Usuário sem perfil não entra.
    pub async fn validate_token(&self, token: &str) -> Result<AuthContext, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .store
            .find_user_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;
        let profile = self
            .store
            .profile_for_user(user.id)
            .await?
            .ok_or(AppError::Forbidden(
                "Usuário sem perfil associado.".to_string(),
            ))?;

        Ok(AuthContext {
            user_id: user.id,
            username: user.username,
            role: profile.role,
            branch_id: profile.branch_id,
        })
    }

    pub async fn me(&self, ctx: &AuthContext) -> Result<MeResponse, AppError> {
        let user = self
            .store
            .find_user_by_id(ctx.user_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;
        let profile = self
            .store
            .profile_for_user(ctx.user_id)
            .await?
            .ok_or(AppError::NotFound("Perfil"))?;
        Ok(MeResponse { user, profile })
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
