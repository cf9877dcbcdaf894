mod common;

use axum::http::StatusCode;
use serde_json::json;
use waste_ops_api::models::{auth::Role, mission::MissionStatus, staff::StaffStatus};

use common::TestApp;

#[tokio::test]
async fn only_admins_create_staff_profiles() {
    let app = TestApp::new();
    let (_, staff_token) = app.user(Role::Staff);
    let (_, admin) = app.user(Role::Admin);
    let (recruit, _) = app.user(Role::Staff);

    let body = json!({
        "id": recruit.id,
        "first_name": "Inès",
        "last_name": "Moreau",
        "position": "Ripeuse"
    });

    let (status, _) = app
        .call("POST", "/api/staff", Some(&staff_token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.writes(), 0);

    let (status, created) = app.call("POST", "/api/staff", Some(&admin), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["staff"]["status"], "active");
    assert_eq!(created["staff"]["availability"]["saturday"], false);

    let (status, _) = app.call("POST", "/api/staff", Some(&admin), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Sem conta provisionada não há perfil
    let mut orphan = body;
    orphan["id"] = json!(uuid::Uuid::new_v4());
    let (status, _) = app.call("POST", "/api/staff", Some(&admin), Some(orphan)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clients_cannot_list_staff() {
    let app = TestApp::new();
    let (_, token) = app.user(Role::Client);

    let (status, _) = app.call("GET", "/api/staff", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_carries_ratings_and_workload() {
    let app = TestApp::new();
    let (_, admin) = app.user(Role::Admin);
    let (driver, _) = app.user(Role::Staff);
    app.staff_profile(driver.id, StaffStatus::Active);
    let client = app.client_for(None, "Acme");
    app.mission(client.id, Some(driver.id), MissionStatus::Assigned);
    app.mission(client.id, Some(driver.id), MissionStatus::Completed);

    let (status, body) = app.call("GET", "/api/staff", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["staff"][0]["active_missions"], 1);
    assert_eq!(body["staff"][0]["total_ratings"], 0);
    assert!(body["staff"][0]["average_rating"].is_null());
    assert_eq!(body["statistics"]["status_counts"]["active"], 1);
}

#[tokio::test]
async fn members_edit_personal_data_but_not_employment() {
    let app = TestApp::new();
    let (driver, token) = app.user(Role::Staff);
    let before = app.staff_profile(driver.id, StaffStatus::Active);
    let uri = format!("/api/staff/{}", driver.id);

    let (status, _) = app
        .call("PUT", &uri, Some(&token), Some(json!({ "hourly_rate": 99.0 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call("PUT", &uri, Some(&token), Some(json!({ "status": "on_leave" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call("PUT", &uri, Some(&token), Some(json!({ "phone": "0600000000" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staff"]["phone"], "0600000000");
    assert_eq!(body["staff"]["position"], before.position);
}

#[tokio::test]
async fn members_cannot_edit_someone_else() {
    let app = TestApp::new();
    let (_, token) = app.user(Role::Staff);
    let (other, _) = app.user(Role::Staff);
    app.staff_profile(other.id, StaffStatus::Active);

    let (status, _) = app
        .call(
            "PUT",
            "/api/staff",
            Some(&token),
            Some(json!({ "id": other.id, "phone": "0611111111" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_changes_employment_fields() {
    let app = TestApp::new();
    let (_, admin) = app.user(Role::Admin);
    let (driver, _) = app.user(Role::Staff);
    app.staff_profile(driver.id, StaffStatus::Active);

    let (status, body) = app
        .call(
            "PUT",
            &format!("/api/staff/{}", driver.id),
            Some(&admin),
            Some(json!({ "status": "on_leave", "department": "Tri" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staff"]["status"], "on_leave");
    assert_eq!(body["staff"]["department"], "Tri");
}

#[tokio::test]
async fn members_with_active_missions_are_kept() {
    let app = TestApp::new();
    let (_, admin) = app.user(Role::Admin);
    let (busy, _) = app.user(Role::Staff);
    let (idle, _) = app.user(Role::Staff);
    app.staff_profile(busy.id, StaffStatus::Active);
    app.staff_profile(idle.id, StaffStatus::Active);
    let client = app.client_for(None, "Acme");
    app.mission(client.id, Some(busy.id), MissionStatus::InProgress);
    app.mission(client.id, Some(idle.id), MissionStatus::Completed);

    let (status, _) = app
        .call("DELETE", &format!("/api/staff?id={}", busy.id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call("DELETE", &format!("/api/staff/{}", idle.id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.store.tables.lock().unwrap().staff.iter().all(|s| s.id != idle.id));
}

#[tokio::test]
async fn non_admin_delete_leaves_the_profile() {
    let app = TestApp::new();
    let (driver, token) = app.user(Role::Staff);
    app.staff_profile(driver.id, StaffStatus::Active);

    let (status, _) = app
        .call("DELETE", &format!("/api/staff/{}", driver.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.tables.lock().unwrap().staff.len(), 1);
}

#[tokio::test]
async fn negative_limit_is_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.user(Role::Admin);

    let (status, body) = app.call("GET", "/api/staff?limit=-1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("limit").is_some());
}
