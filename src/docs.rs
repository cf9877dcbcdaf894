// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};

use crate::config::DEFAULT_SESSION_COOKIE;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::auth_callback,
        handlers::auth::get_me,

        // --- Missions ---
        handlers::missions::list_missions,
        handlers::missions::create_mission,
        handlers::missions::update_mission,
        handlers::missions::update_mission_by_id,
        handlers::missions::delete_mission,
        handlers::missions::delete_mission_by_id,
        handlers::activity::add_comment,
        handlers::activity::add_mission_update,
        handlers::activity::rate_mission,

        // --- Requests ---
        handlers::requests::list_requests,
        handlers::requests::create_request,
        handlers::requests::update_request,
        handlers::requests::delete_request,

        // --- Staff ---
        handlers::staff::list_staff,
        handlers::staff::create_staff,
        handlers::staff::update_staff,
        handlers::staff::update_staff_by_id,
        handlers::staff::delete_staff,
        handlers::staff::delete_staff_by_id,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Payments ---
        handlers::payments::list_payments,
        handlers::payments::create_payment,
        handlers::payments::update_payment,
        handlers::payments::delete_payment,
    ),
    components(
        schemas(
            models::MessageResponse,

            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::UserResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,

            // --- Clients ---
            models::client::Client,

            // --- Staff ---
            models::staff::StaffStatus,
            models::staff::Availability,
            models::staff::EmergencyContact,
            models::staff::StaffProfile,
            models::staff::StaffWithStats,
            models::staff::StaffStatistics,
            models::staff::StaffListResponse,
            models::staff::StaffResponse,
            models::staff::StaffFilter,
            models::staff::CreateStaffPayload,
            models::staff::UpdateStaffPayload,

            // --- Missions ---
            models::mission::ServiceType,
            models::mission::MissionStatus,
            models::mission::Priority,
            models::mission::Mission,
            models::mission::MissionListItem,
            models::mission::MissionStatistics,
            models::mission::MissionListResponse,
            models::mission::MissionResponse,
            models::mission::MissionFilter,
            models::mission::CreateMissionPayload,
            models::mission::CreateRequestPayload,
            models::mission::UpdateMissionPayload,

            // --- Payments ---
            models::payment::PaymentMethod,
            models::payment::PaymentStatus,
            models::payment::Payment,
            models::payment::PaymentListItem,
            models::payment::PaymentStatistics,
            models::payment::PaymentListResponse,
            models::payment::PaymentResponse,
            models::payment::PaymentFilter,
            models::payment::CreatePaymentPayload,
            models::payment::UpdatePaymentPayload,

            // --- Activity ---
            models::activity::Comment,
            models::activity::MissionUpdate,
            models::activity::Rating,
            models::activity::CreateCommentPayload,
            models::activity::CreateMissionUpdatePayload,
            models::activity::CreateRatingPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Sessão e verificação de e-mail"),
        (name = "Missions", description = "Ordens de serviço, comentários e avaliações"),
        (name = "Requests", description = "Pedidos de serviço abertos pelos clientes"),
        (name = "Staff", description = "Pessoal de campo"),
        (name = "Users", description = "Contas de acesso (admin)"),
        (name = "Payments", description = "Pagamentos das missões")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_SESSION_COOKIE))),
        );
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
