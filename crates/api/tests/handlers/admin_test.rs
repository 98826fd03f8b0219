use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use salonbook_core::models::{
    booking::{AdminBookingsResponse, Booking, BookingStatus},
    user::{UserResponse, UserRole},
};
use serde_json::json;

use crate::test_utils::{day, TestContext};

#[tokio::test]
async fn test_admin_list_orders_newest_day_first() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let client = ctx.register_client().await;

    ctx.book(client.id, "4", day(3), "14:00").await;
    ctx.book(client.id, "4", day(3), "09:00").await;
    let later = ctx.book(client.id, "4", day(8), "10:00").await;

    ctx.server
        .post(&format!("/api/admin/bookings/{}/confirm", later.booking.id))
        .json(&json!({ "admin_id": admin.id }))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .get("/api/admin/bookings")
        .add_query_param("admin_id", admin.id)
        .await;

    response.assert_status_ok();
    let body = response.json::<AdminBookingsResponse>();
    let slots: Vec<String> = body
        .bookings
        .iter()
        .map(|entry| format!("{} {}", entry.booking.date, entry.booking.start_time))
        .collect();
    assert_eq!(
        slots,
        vec!["2025-07-08 10:00", "2025-07-03 09:00", "2025-07-03 14:00"]
    );
    assert_eq!(body.awaiting_deposit, 2);
    assert!(body
        .bookings
        .iter()
        .all(|entry| entry.client_name.as_deref() == Some(client.name.as_str())
            && entry.client_phone.as_deref() == Some(client.phone.as_str())));
}

#[tokio::test]
async fn test_admin_lists_client_base() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let first = ctx.register_client().await;
    let second = ctx.register_client().await;

    let response = ctx
        .server
        .get("/api/admin/users")
        .add_query_param("admin_id", admin.id)
        .await;

    response.assert_status_ok();
    let users = response.json::<Vec<UserResponse>>();
    assert_eq!(users.len(), 3);
    for client in [&first, &second] {
        let listed = users.iter().find(|u| u.id == client.id).unwrap();
        assert_eq!(listed, client);
    }
    assert_eq!(
        users.iter().filter(|u| u.role == UserRole::Admin).count(),
        1
    );
    let body = response.json::<serde_json::Value>();
    assert!(body[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_client_base_is_admin_only() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;

    ctx.server
        .get("/api/admin/users")
        .add_query_param("admin_id", client.id)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    let created = ctx.book(client.id, "4", day(3), "09:00").await;

    ctx.server
        .get("/api/admin/bookings")
        .add_query_param("admin_id", client.id)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    ctx.server
        .post(&format!("/api/admin/bookings/{}/confirm", created.booking.id))
        .json(&json!({ "admin_id": client.id }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deposit_then_completion() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let client = ctx.register_client().await;
    let created = ctx.book(client.id, "4", day(3), "09:00").await;
    let confirm_url = format!("/api/admin/bookings/{}/confirm", created.booking.id);
    let complete_url = format!("/api/admin/bookings/{}/complete", created.booking.id);

    // Completing before the deposit arrives is refused.
    ctx.server
        .post(&complete_url)
        .json(&json!({ "admin_id": admin.id }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let paid = ctx
        .server
        .post(&confirm_url)
        .json(&json!({ "admin_id": admin.id }))
        .await
        .json::<Booking>();
    assert_eq!(paid.status, BookingStatus::Paid);

    // A second confirmation changes nothing.
    let again = ctx
        .server
        .post(&confirm_url)
        .json(&json!({ "admin_id": admin.id }))
        .await;
    again.assert_status_ok();
    assert_eq!(again.json::<Booking>(), paid);

    let done = ctx
        .server
        .post(&complete_url)
        .json(&json!({ "admin_id": admin.id }))
        .await
        .json::<Booking>();
    assert_eq!(done.status, BookingStatus::Completed);

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", created.booking.id))
        .json(&json!({ "requester_id": admin.id }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
