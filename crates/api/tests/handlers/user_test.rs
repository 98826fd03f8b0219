use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use mockall::predicate;
use pretty_assertions::assert_eq;
use salonbook_api::build_router;
use salonbook_core::models::{
    booking::Booking,
    user::{UserResponse, UserRole},
};
use salonbook_db::{memory::MemoryStore, mock::stores::MockUserStore};
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{day, state_over, TestContext, CLIENT_PASSWORD};

#[tokio::test]
async fn test_register_creates_client() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/users")
        .json(&json!({
            "name": "  Ana Souza ",
            "email": " Ana@Example.COM ",
            "phone": "(41) 99876-5432",
            "password": "segredo",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let user = response.json::<UserResponse>();
    assert_eq!(user.name, "Ana Souza");
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.role, UserRole::Client);

    let body = response.json::<serde_json::Value>();
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let ctx = TestContext::new();
    let payload = json!({
        "name": "Ana",
        "email": "ana@example.com",
        "phone": "",
        "password": "segredo",
    });

    ctx.server
        .post("/api/users")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let mut shouting = payload.clone();
    shouting["email"] = json!("ANA@EXAMPLE.COM");
    ctx.server
        .post("/api/users")
        .json(&shouting)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validates_input() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/users")
        .json(&json!({
            "name": "Ana",
            "email": "not-an-email",
            "phone": "",
            "password": "segredo",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;

    let ok = ctx
        .server
        .post("/api/users/login")
        .json(&json!({ "email": client.email.to_uppercase(), "password": CLIENT_PASSWORD }))
        .await;
    let wrong_password = ctx
        .server
        .post("/api/users/login")
        .json(&json!({ "email": client.email, "password": "nope" }))
        .await;
    let unknown = ctx
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "ghost@example.com", "password": CLIENT_PASSWORD }))
        .await;

    ok.assert_status_ok();
    assert_eq!(ok.json::<UserResponse>().id, client.id);
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_looks_up_normalized_email() {
    let mut users = MockUserStore::new();
    users
        .expect_get_user_by_email()
        .with(predicate::eq("ana@example.com".to_string()))
        .times(1)
        .returning(|_| Ok(None));

    let server = TestServer::new(build_router(state_over(
        Arc::new(MemoryStore::new()),
        Arc::new(users),
    )))
    .unwrap();

    let response = server
        .post("/api/users/login")
        .json(&json!({ "email": "  Ana@Example.com", "password": "x" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_lists_own_bookings_in_order() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    let other = ctx.register_client().await;

    ctx.book(client.id, "4", day(5), "09:00").await;
    ctx.book(client.id, "4", day(3), "15:00").await;
    ctx.book(client.id, "4", day(3), "10:00").await;
    ctx.book(other.id, "4", day(4), "10:00").await;

    let response = ctx
        .server
        .get(&format!("/api/users/{}/bookings", client.id))
        .await;

    response.assert_status_ok();
    let slots: Vec<(String, String)> = response
        .json::<Vec<Booking>>()
        .iter()
        .map(|b| (b.date.to_string(), b.start_time.to_string()))
        .collect();
    assert_eq!(
        slots,
        vec![
            ("2025-07-03".to_string(), "10:00".to_string()),
            ("2025-07-03".to_string(), "15:00".to_string()),
            ("2025-07-05".to_string(), "09:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_dashboard_for_unknown_user() {
    let ctx = TestContext::new();

    ctx.server
        .get(&format!("/api/users/{}/bookings", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
