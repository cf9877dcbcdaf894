// src/handlers/missions.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::{
        IdQuery, MessageResponse,
        mission::{
            CreateMissionPayload, MissionFilter, MissionListResponse, MissionResponse,
            UpdateMissionPayload,
        },
    },
    services::mission_service::MissionService,
};

// GET /api/missions
#[utoipa::path(
    get,
    path = "/api/missions",
    tag = "Missions",
    params(MissionFilter),
    responses(
        (status = 200, description = "Missions visibles pour l'appelant", body = MissionListResponse),
        (status = 401, description = "Non authentifié")
    ),
    security(("session" = []))
)]
pub async fn list_missions(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(filter): AppQuery<MissionFilter>,
) -> Result<Json<MissionListResponse>, AppError> {
    let response = MissionService::new(&app_state)
        .list(&user.actor(), filter)
        .await?;
    Ok(Json(response))
}

// POST /api/missions
#[utoipa::path(
    post,
    path = "/api/missions",
    tag = "Missions",
    request_body = CreateMissionPayload,
    responses(
        (status = 201, description = "Mission créée", body = MissionResponse),
        (status = 400, description = "Données invalides ou personnel inactif"),
        (status = 403, description = "Réservé aux administrateurs"),
        (status = 404, description = "Client ou personnel introuvable")
    ),
    security(("session" = []))
)]
pub async fn create_mission(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<CreateMissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mission = MissionService::new(&app_state)
        .create(&admin.actor(), payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MissionResponse {
            mission,
            message: "Mission créée avec succès".into(),
        }),
    ))
}

// PUT /api/missions (id no corpo)
#[utoipa::path(
    put,
    path = "/api/missions",
    tag = "Missions",
    request_body = UpdateMissionPayload,
    responses(
        (status = 200, description = "Mission mise à jour", body = MissionResponse),
        (status = 400, description = "Données invalides, id manquant ou transition interdite"),
        (status = 403, description = "Ni administrateur ni responsable"),
        (status = 404, description = "Mission introuvable")
    ),
    security(("session" = []))
)]
pub async fn update_mission(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateMissionPayload>,
) -> Result<Json<MissionResponse>, AppError> {
    let id = payload.id.ok_or(AppError::MissingId)?;
    apply_update(&app_state, &user, id, payload).await
}

// PUT /api/missions/{id}
#[utoipa::path(
    put,
    path = "/api/missions/{id}",
    tag = "Missions",
    params(("id" = Uuid, Path, description = "ID da missão")),
    request_body = UpdateMissionPayload,
    responses(
        (status = 200, description = "Mission mise à jour", body = MissionResponse),
        (status = 404, description = "Mission introuvable")
    ),
    security(("session" = []))
)]
pub async fn update_mission_by_id(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateMissionPayload>,
) -> Result<Json<MissionResponse>, AppError> {
    apply_update(&app_state, &user, id, payload).await
}

pub(crate) async fn apply_update(
    app_state: &AppState,
    user: &AuthenticatedUser,
    id: Uuid,
    payload: UpdateMissionPayload,
) -> Result<Json<MissionResponse>, AppError> {
    let mission = MissionService::new(app_state)
        .update(&user.actor(), id, payload)
        .await?;

    Ok(Json(MissionResponse {
        mission,
        message: "Mission mise à jour avec succès".into(),
    }))
}

// DELETE /api/missions?id=
#[utoipa::path(
    delete,
    path = "/api/missions",
    tag = "Missions",
    params(IdQuery),
    responses(
        (status = 200, description = "Mission supprimée", body = MessageResponse),
        (status = 400, description = "Id manquant ou mission démarrée/terminée"),
        (status = 403, description = "Réservé aux administrateurs"),
        (status = 404, description = "Mission introuvable")
    ),
    security(("session" = []))
)]
pub async fn delete_mission(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppQuery(query): AppQuery<IdQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = query.id.ok_or(AppError::MissingId)?;
    apply_delete(&app_state, &admin, id).await
}

// DELETE /api/missions/{id}
#[utoipa::path(
    delete,
    path = "/api/missions/{id}",
    tag = "Missions",
    params(("id" = Uuid, Path, description = "ID da missão")),
    responses(
        (status = 200, description = "Mission supprimée", body = MessageResponse),
        (status = 400, description = "Mission démarrée ou terminée"),
        (status = 404, description = "Mission introuvable")
    ),
    security(("session" = []))
)]
pub async fn delete_mission_by_id(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    apply_delete(&app_state, &admin, id).await
}

pub(crate) async fn apply_delete(
    app_state: &AppState,
    admin: &RequireRole<AdminOnly>,
    id: Uuid,
) -> Result<Json<MessageResponse>, AppError> {
    MissionService::new(app_state)
        .delete(&admin.actor(), id)
        .await?;
    Ok(Json(MessageResponse::new("Mission supprimée avec succès")))
}
