// src/routes.rs

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Públicas
    let public_routes = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/auth/callback", get(handlers::auth::auth_callback));

    // Tudo abaixo passa pelo auth_guard (sessão + perfil)
    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::get_me))
        .route(
            "/api/missions",
            get(handlers::missions::list_missions)
                .post(handlers::missions::create_mission)
                .put(handlers::missions::update_mission)
                .delete(handlers::missions::delete_mission),
        )
        .route(
            "/api/missions/{id}",
            put(handlers::missions::update_mission_by_id)
                .delete(handlers::missions::delete_mission_by_id),
        )
        .route(
            "/api/missions/{id}/comments",
            post(handlers::activity::add_comment),
        )
        .route(
            "/api/missions/{id}/updates",
            post(handlers::activity::add_mission_update),
        )
        .route(
            "/api/missions/{id}/rating",
            post(handlers::activity::rate_mission),
        )
        .route(
            "/api/requests",
            get(handlers::requests::list_requests).post(handlers::requests::create_request),
        )
        .route(
            "/api/requests/{id}",
            put(handlers::requests::update_request).delete(handlers::requests::delete_request),
        )
        .route(
            "/api/staff",
            get(handlers::staff::list_staff)
                .post(handlers::staff::create_staff)
                .put(handlers::staff::update_staff)
                .delete(handlers::staff::delete_staff),
        )
        .route(
            "/api/staff/{id}",
            put(handlers::staff::update_staff_by_id).delete(handlers::staff::delete_staff_by_id),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{id}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route(
            "/api/payments",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route(
            "/api/payments/{id}",
            put(handlers::payments::update_payment).delete(handlers::payments::delete_payment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
}
