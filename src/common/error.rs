// src/common/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Toda falha de uma rota termina aqui e vira uma resposta JSON com `error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Non authentifié")]
    Unauthenticated,

    #[error("Profil utilisateur introuvable")]
    ProfileMissing,

    #[error("{0}")]
    Forbidden(String),

    #[error("Données invalides")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corps de requête mal formé")]
    MalformedBody(String),

    #[error("Identifiant requis")]
    MissingId,

    #[error("{0} introuvable")]
    ResourceNotFound(String),

    #[error("{0}")]
    StateConflict(String),

    #[error("{0} existe déjà")]
    AlreadyExists(String),

    #[error("Fournisseur d'identité: {0}")]
    IdentityRejected(String),

    #[error("Erreur de la base de données")]
    StoreFailure(#[from] sqlx::Error),

    #[error("Erreur serveur interne")]
    UnexpectedError(#[from] anyhow::Error),
}

impl AppError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        AppError::Forbidden(reason.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::ResourceNotFound(what.into())
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        AppError::StateConflict(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::ProfileMissing | AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ValidationError(_)
            | AppError::MalformedBody(_)
            | AppError::MissingId
            | AppError::StateConflict(_)
            | AppError::IdentityRejected(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::StoreFailure(_) | AppError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            // Todos os campos inválidos de uma vez, agrupados por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{} invalide", field))
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({ "error": self.to_string(), "details": details })
            }
            AppError::MalformedBody(detail) => {
                json!({ "error": self.to_string(), "details": detail })
            }
            AppError::StoreFailure(e) => {
                tracing::error!("Falha no banco de dados: {}", e);
                json!({ "error": self.to_string(), "details": e.to_string() })
            }
            AppError::UnexpectedError(e) => {
                tracing::error!("Erro interno do servidor: {:#}", e);
                json!({ "error": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
