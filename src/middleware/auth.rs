// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    extract::CookieJar,
    headers::{Authorization, HeaderMapExt, authorization::Bearer},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Role, User},
};

/// Quem está chamando: só o que a autorização precisa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

// Usuário resolvido pelo `auth_guard`, guardado nos extensions da requisição
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.0.id,
            role: self.0.role,
        }
    }
}

/// Token de acesso: cookie de sessão primeiro, depois `Authorization: Bearer`.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

// requireSession + requireProfile, uma vez para todas as rotas protegidas
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers(), &app_state.session_cookie)
        .ok_or(AppError::Unauthenticated)?;

    let session = app_state
        .identity
        .get_session(&token)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    // Identidade existe mas a linha em `users` não: divergência entre provedor e banco
    let user = app_state
        .users
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Sessão válida sem perfil em users: {}", session.user_id);
            AppError::ProfileMissing
        })?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
