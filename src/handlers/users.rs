// src/handlers/users.rs
//
// Gestão de contas: tudo aqui é exclusivo de administradores.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    models::{
        MessageResponse,
        auth::{CreateUserPayload, UpdateUserPayload, User, UserResponse},
    },
    services::user_service::UserService,
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Tous les utilisateurs", body = [User]),
        (status = 403, description = "Réservé aux administrateurs")
    ),
    security(("session" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _admin: RequireRole<AdminOnly>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::new(&app_state).list().await?;
    Ok(Json(users))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Utilisateur créé", body = UserResponse),
        (status = 400, description = "Données invalides ou refus du fournisseur d'identité"),
        (status = 409, description = "E-mail déjà utilisé")
    ),
    security(("session" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&app_state)
        .create(&admin.actor(), payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user,
            message: "Utilisateur créé avec succès".into(),
        }),
    ))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Utilisateur mis à jour", body = UserResponse),
        (status = 404, description = "Utilisateur introuvable")
    ),
    security(("session" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateUserPayload>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::new(&app_state)
        .update(&admin.actor(), id, payload)
        .await?;

    Ok(Json(UserResponse {
        user,
        message: "Utilisateur mis à jour avec succès".into(),
    }))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Utilisateur supprimé", body = MessageResponse),
        (status = 400, description = "Suppression de son propre compte"),
        (status = 404, description = "Utilisateur introuvable")
    ),
    security(("session" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::new(&app_state)
        .delete(&admin.actor(), id)
        .await?;
    Ok(Json(MessageResponse::new("Utilisateur supprimé avec succès")))
}
