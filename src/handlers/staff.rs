// src/handlers/staff.rs

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
        rbac::{AdminOnly, AdminOrStaff, RequireRole},
    },
    models::{
        IdQuery, MessageResponse,
        staff::{
            CreateStaffPayload, StaffFilter, StaffListResponse, StaffResponse, UpdateStaffPayload,
        },
    },
    services::staff_service::StaffService,
};

// GET /api/staff
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    params(StaffFilter),
    responses(
        (status = 200, description = "Personnel avec notes et charge", body = StaffListResponse),
        (status = 403, description = "Réservé à l'administration et au personnel")
    ),
    security(("session" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    _caller: RequireRole<AdminOrStaff>,
    AppQuery(filter): AppQuery<StaffFilter>,
) -> Result<Json<StaffListResponse>, AppError> {
    let response = StaffService::new(&app_state).list(filter).await?;
    Ok(Json(response))
}

// POST /api/staff
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    request_body = CreateStaffPayload,
    responses(
        (status = 201, description = "Profil créé", body = StaffResponse),
        (status = 400, description = "Données invalides"),
        (status = 404, description = "Utilisateur introuvable"),
        (status = 409, description = "Profil déjà existant")
    ),
    security(("session" = []))
)]
pub async fn create_staff(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<CreateStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    let staff = StaffService::new(&app_state)
        .create(&admin.actor(), payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StaffResponse {
            staff,
            message: "Membre du personnel créé avec succès".into(),
        }),
    ))
}

// PUT /api/staff (id no corpo)
#[utoipa::path(
    put,
    path = "/api/staff",
    tag = "Staff",
    request_body = UpdateStaffPayload,
    responses(
        (status = 200, description = "Profil mis à jour", body = StaffResponse),
        (status = 400, description = "Données invalides ou id manquant"),
        (status = 403, description = "Ni administrateur ni le membre lui-même")
    ),
    security(("session" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateStaffPayload>,
) -> Result<Json<StaffResponse>, AppError> {
    let id = payload.id.ok_or(AppError::MissingId)?;
    apply_update(&app_state, &user, id, payload).await
}

// PUT /api/staff/{id}
#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID do membro (= id do usuário)")),
    request_body = UpdateStaffPayload,
    responses(
        (status = 200, description = "Profil mis à jour", body = StaffResponse),
        (status = 404, description = "Membre introuvable")
    ),
    security(("session" = []))
)]
pub async fn update_staff_by_id(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateStaffPayload>,
) -> Result<Json<StaffResponse>, AppError> {
    apply_update(&app_state, &user, id, payload).await
}

async fn apply_update(
    app_state: &AppState,
    user: &AuthenticatedUser,
    id: Uuid,
    payload: UpdateStaffPayload,
) -> Result<Json<StaffResponse>, AppError> {
    let staff = StaffService::new(app_state)
        .update(&user.actor(), id, payload)
        .await?;

    Ok(Json(StaffResponse {
        staff,
        message: "Profil mis à jour avec succès".into(),
    }))
}

// DELETE /api/staff?id=
#[utoipa::path(
    delete,
    path = "/api/staff",
    tag = "Staff",
    params(IdQuery),
    responses(
        (status = 200, description = "Profil supprimé", body = MessageResponse),
        (status = 400, description = "Id manquant ou missions en cours"),
        (status = 403, description = "Réservé aux administrateurs")
    ),
    security(("session" = []))
)]
pub async fn delete_staff(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppQuery(query): AppQuery<IdQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = query.id.ok_or(AppError::MissingId)?;
    apply_delete(&app_state, &admin, id).await
}

// DELETE /api/staff/{id}
#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 200, description = "Profil supprimé", body = MessageResponse),
        (status = 404, description = "Membre introuvable")
    ),
    security(("session" = []))
)]
pub async fn delete_staff_by_id(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    apply_delete(&app_state, &admin, id).await
}

async fn apply_delete(
    app_state: &AppState,
    admin: &RequireRole<AdminOnly>,
    id: Uuid,
) -> Result<Json<MessageResponse>, AppError> {
    StaffService::new(app_state)
        .delete(&admin.actor(), id)
        .await?;
    Ok(Json(MessageResponse::new(
        "Membre du personnel supprimé avec succès",
    )))
}
