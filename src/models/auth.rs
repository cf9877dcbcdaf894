// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Client,
    Staff,
}

impl_label!(Role {
    Admin => "admin",
    Client => "client",
    Staff => "staff",
});

// Linha da tabela `users`: a identidade de negócio de cada sessão
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Camille Martin")]
    pub full_name: String,
    #[schema(example = "camille@example.fr")]
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Sessão resolvida pelo provedor de identidade a partir do cookie/token
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub expires_at: i64,
}

// Estrutura de dados ("claims") dentro do JWT de acesso
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
}

// Usuário como o provedor de identidade o devolve (API admin)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdentityUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.role.is_none()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[validate(
        required(message = "email est requis"),
        email(message = "email invalide")
    )]
    #[schema(example = "nouveau@example.fr")]
    pub email: Option<String>,

    #[validate(
        required(message = "password est requis"),
        length(min = 6, message = "password doit contenir au moins 6 caractères")
    )]
    pub password: Option<String>,

    #[validate(
        required(message = "full_name est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub full_name: Option<String>,

    #[validate(
        required(message = "role est requis"),
        custom(function = "crate::validation::role")
    )]
    #[schema(example = "staff")]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserPayload {
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub full_name: Option<String>,

    #[validate(custom(function = "crate::validation::role"))]
    pub role: Option<String>,
}

// GET /api/auth/callback
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthCallbackQuery {
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
    pub message: String,
}
