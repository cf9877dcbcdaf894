// src/handlers/auth.rs

use axum::{Json, extract::State, response::Redirect};

use crate::{
    common::extract::AppQuery,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthCallbackQuery, User},
};

// Só caminhos locais: nada de `//host`, `/\host` nem URLs absolutas.
// Navegadores tratam `\` como `/` e ignoram caracteres de controle.
fn local_path(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}

// GET /api/auth/callback
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = "Auth",
    params(AuthCallbackQuery),
    responses(
        (status = 303, description = "Vers `next` si l'e-mail est vérifié, sinon vers /error")
    )
)]
pub async fn auth_callback(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<AuthCallbackQuery>,
) -> Redirect {
    let next = local_path(query.next.as_deref());

    if let (Some(token_hash), Some("email")) = (query.token_hash.as_deref(), query.kind.as_deref())
    {
        match app_state.identity.verify_otp("email", token_hash).await {
            Ok(()) => return Redirect::to(next),
            Err(e) => tracing::warn!("Verificação de e-mail recusada: {}", e),
        }
    }

    Redirect::to("/error")
}

// GET /api/me
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Profil de l'utilisateur connecté", body = User),
        (status = 401, description = "Non authentifié"),
        (status = 404, description = "Profil utilisateur introuvable")
    ),
    security(("session" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
