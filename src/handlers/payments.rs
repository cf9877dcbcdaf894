// src/handlers/payments.rs

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
        MessageResponse,
        payment::{
            CreatePaymentPayload, PaymentFilter, PaymentListResponse, PaymentResponse,
            UpdatePaymentPayload,
        },
    },
    services::payment_service::PaymentService,
};

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    params(PaymentFilter),
    responses(
        (status = 200, description = "Paiements visibles pour l'appelant", body = PaymentListResponse)
    ),
    security(("session" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(filter): AppQuery<PaymentFilter>,
) -> Result<Json<PaymentListResponse>, AppError> {
    let response = PaymentService::new(&app_state)
        .list(&user.actor(), filter)
        .await?;
    Ok(Json(response))
}

// POST /api/payments
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Paiement créé", body = PaymentResponse),
        (status = 400, description = "Données invalides ou client différent de la mission"),
        (status = 404, description = "Mission introuvable")
    ),
    security(("session" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payment = PaymentService::new(&app_state)
        .create(&admin.actor(), payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            payment,
            message: "Paiement créé avec succès".into(),
        }),
    ))
}

// PUT /api/payments/{id}
#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    request_body = UpdatePaymentPayload,
    responses(
        (status = 200, description = "Paiement mis à jour", body = PaymentResponse),
        (status = 400, description = "Données invalides ou transition interdite"),
        (status = 404, description = "Paiement introuvable")
    ),
    security(("session" = []))
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdatePaymentPayload>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = PaymentService::new(&app_state)
        .update(&admin.actor(), id, payload)
        .await?;

    Ok(Json(PaymentResponse {
        payment,
        message: "Paiement mis à jour avec succès".into(),
    }))
}

// DELETE /api/payments/{id}
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Paiement supprimé", body = MessageResponse),
        (status = 400, description = "Paiement complété"),
        (status = 404, description = "Paiement introuvable")
    ),
    security(("session" = []))
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    admin: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    PaymentService::new(&app_state)
        .delete(&admin.actor(), id)
        .await?;
    Ok(Json(MessageResponse::new("Paiement supprimé avec succès")))
}
