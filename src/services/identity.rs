// src/services/identity.rs
//
// Provedor de identidade externo (GoTrue/Supabase). As sessões são tokens de
// acesso HS256; as operações administrativas passam pela API REST com a chave
// de serviço.

use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        Label,
        auth::{Claims, IdentityUser, NewIdentity, Session, UserChanges},
    },
};

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `None` quando o token não corresponde a uma sessão viva.
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError>;

    async fn verify_otp(&self, kind: &str, token_hash: &str) -> Result<(), AppError>;

    async fn create_user(&self, identity: &NewIdentity) -> Result<IdentityUser, AppError>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<IdentityUser>, AppError>;

    async fn update_user_by_id(&self, id: Uuid, changes: &UserChanges) -> Result<(), AppError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), AppError>;
}

pub struct SupabaseIdentity {
    http: reqwest::Client,
    base_url: String,
    service_role_key: String,
    jwt_secret: String,
}

// Corpo de erro da API do GoTrue (os nomes dos campos variam por versão)
#[derive(Debug, Deserialize)]
struct ProviderError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

impl SupabaseIdentity {
    pub fn new(base_url: &str, service_role_key: String, jwt_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key,
            jwt_secret,
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/auth/v1/admin/users{}", self.base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    /// Converte uma resposta de erro do provedor em `IdentityRejected`.
    async fn rejection(response: reqwest::Response) -> AppError {
        let status = response.status();
        let message = match response.json::<ProviderError>().await {
            Ok(body) => body
                .msg
                .or(body.message)
                .or(body.error_description)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        tracing::error!("Provedor de identidade recusou a operação ({}): {}", status, message);
        AppError::IdentityRejected(message)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["authenticated"]);

        match decode::<Claims>(
            access_token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => Ok(Some(Session {
                user_id: data.claims.sub,
                email: data.claims.email,
                expires_at: data.claims.exp as i64,
            })),
            Err(e) => {
                tracing::debug!("Token de sessão rejeitado: {}", e);
                Ok(None)
            }
        }
    }

    async fn verify_otp(&self, kind: &str, token_hash: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/verify", self.base_url))
            .header("apikey", &self.service_role_key)
            .json(&json!({ "type": kind, "token_hash": token_hash }))
            .send()
            .await
            .context("Falha ao contatar o provedor de identidade (verify)")?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn create_user(&self, identity: &NewIdentity) -> Result<IdentityUser, AppError> {
        let response = self
            .authorized(self.http.post(self.admin_url("")))
            .json(&json!({
                "email": identity.email,
                "password": identity.password,
                "email_confirm": true,
                "user_metadata": {
                    "full_name": identity.full_name,
                    "role": identity.role.as_str(),
                },
            }))
            .send()
            .await
            .context("Falha ao contatar o provedor de identidade (create)")?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let user = response
            .json::<IdentityUser>()
            .await
            .context("Resposta inesperada do provedor de identidade (create)")?;
        Ok(user)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<IdentityUser>, AppError> {
        let response = self
            .authorized(self.http.get(self.admin_url(&format!("/{id}"))))
            .send()
            .await
            .context("Falha ao contatar o provedor de identidade (get)")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let user = response
            .json::<IdentityUser>()
            .await
            .context("Resposta inesperada do provedor de identidade (get)")?;
        Ok(Some(user))
    }

    async fn update_user_by_id(&self, id: Uuid, changes: &UserChanges) -> Result<(), AppError> {
        let mut metadata = serde_json::Map::new();
        if let Some(full_name) = &changes.full_name {
            metadata.insert("full_name".into(), json!(full_name));
        }
        if let Some(role) = changes.role {
            metadata.insert("role".into(), json!(role.as_str()));
        }

        let response = self
            .authorized(self.http.put(self.admin_url(&format!("/{id}"))))
            .json(&json!({ "user_metadata": metadata }))
            .send()
            .await
            .context("Falha ao contatar o provedor de identidade (update)")?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let response = self
            .authorized(self.http.delete(self.admin_url(&format!("/{id}"))))
            .send()
            .await
            .context("Falha ao contatar o provedor de identidade (delete)")?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }
}
