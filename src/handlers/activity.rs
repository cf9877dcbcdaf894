// src/handlers/activity.rs
//
// Filhos de uma missão: comentários, relatórios de campo e a avaliação final.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ClientOnly, RequireRole},
    },
    models::activity::{
        Comment, CreateCommentPayload, CreateMissionUpdatePayload, CreateRatingPayload,
        MissionUpdate, Rating,
    },
    services::activity_service::ActivityService,
};

// POST /api/missions/{id}/comments
#[utoipa::path(
    post,
    path = "/api/missions/{id}/comments",
    tag = "Missions",
    params(("id" = Uuid, Path, description = "ID da missão")),
    request_body = CreateCommentPayload,
    responses(
        (status = 201, description = "Commentaire ajouté", body = Comment),
        (status = 403, description = "Mission hors de portée")
    ),
    security(("session" = []))
)]
pub async fn add_comment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(mission_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateCommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let comment = ActivityService::new(&app_state)
        .add_comment(&user.actor(), mission_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// POST /api/missions/{id}/updates
#[utoipa::path(
    post,
    path = "/api/missions/{id}/updates",
    tag = "Missions",
    params(("id" = Uuid, Path, description = "ID da missão")),
    request_body = CreateMissionUpdatePayload,
    responses(
        (status = 201, description = "Mise à jour enregistrée", body = MissionUpdate),
        (status = 403, description = "Ni administrateur ni responsable")
    ),
    security(("session" = []))
)]
pub async fn add_mission_update(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(mission_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateMissionUpdatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let update = ActivityService::new(&app_state)
        .add_mission_update(&user.actor(), mission_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(update)))
}

// POST /api/missions/{id}/rating
#[utoipa::path(
    post,
    path = "/api/missions/{id}/rating",
    tag = "Missions",
    params(("id" = Uuid, Path, description = "ID da missão")),
    request_body = CreateRatingPayload,
    responses(
        (status = 201, description = "Évaluation enregistrée", body = Rating),
        (status = 400, description = "Mission non terminée ou note hors de 1..5"),
        (status = 403, description = "Mission d'un autre client"),
        (status = 409, description = "Mission déjà évaluée")
    ),
    security(("session" = []))
)]
pub async fn rate_mission(
    State(app_state): State<AppState>,
    client: RequireRole<ClientOnly>,
    AppPath(mission_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateRatingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let rating = ActivityService::new(&app_state)
        .rate_mission(&client.actor(), mission_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}
