// src/handlers/requests.rs
//
// Pedidos de serviço: a mesma tabela de missões, vista pelo lado do cliente.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    config::AppState,
    handlers::missions::{apply_delete, apply_update},
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, AdminOrClient, RequireRole},
    },
    models::{
        MessageResponse,
        mission::{
            CreateRequestPayload, MissionFilter, MissionListResponse, MissionResponse,
            UpdateMissionPayload,
        },
    },
    services::mission_service::MissionService,
};

// GET /api/requests
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    params(MissionFilter),
    responses(
        (status = 200, description = "Demandes visibles pour l'appelant", body = MissionListResponse),
        (status = 401, description = "Non authentifié")
    ),
    security(("session" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(filter): AppQuery<MissionFilter>,
) -> Result<Json<MissionListResponse>, AppError> {
    let response = MissionService::new(&app_state)
        .list(&user.actor(), filter)
        .await?;
    Ok(Json(response))
}

// POST /api/requests
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Demande créée", body = MissionResponse),
        (status = 400, description = "Données invalides"),
        (status = 403, description = "Réservé aux administrateurs et clients")
    ),
    security(("session" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    caller: RequireRole<AdminOrClient>,
    AppJson(payload): AppJson<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mission = MissionService::new(&app_state)
        .create_request(&caller.actor(), payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MissionResponse {
            mission,
            message: "Demande créée avec succès".into(),
        }),
    ))
}

// PUT /api/requests/{id}
#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateMissionPayload,
    responses(
        (status = 200, description = "Demande mise à jour", body = MissionResponse),
        (status = 404, description = "Demande introuvable")
    ),
    security(("session" = []))
)]
pub async fn update_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateMissionPayload>,
) -> Result<Json<MissionResponse>, AppError> {
    apply_update(&app_state, &user, id, payload).await
}

// DELETE /api/requests/{id}
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Demande supprimée", body = MessageResponse),
        (status = 400, description = "Demande démarrée ou terminée"),
        (status = 403, description = "Réservé aux administrateurs")
    ),
    security(("session" = []))
)]
pub async fn delete_request(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    apply_delete(&app_state, &admin, id).await
}
