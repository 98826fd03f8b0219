use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_api::build_router;
use salonbook_core::models::booking::{Booking, BookingStatus};
use salonbook_db::{
    memory::MemoryStore,
    mock::stores::MockBookingStore,
};
use salonbook_notify::NotificationOutcome;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{day, state_over, today, TestContext};

#[tokio::test]
async fn test_create_booking_returns_payment_instructions() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;

    let created = ctx.book(client.id, "1", day(3), "09:00").await;

    assert_eq!(created.booking.status, BookingStatus::Pending);
    assert_eq!(created.booking.end_time.to_string(), "12:00");
    assert_eq!(created.booking.total_cents, 20_000);
    assert_eq!(created.booking.deposit_cents, 6_000);
    assert_eq!(created.payment.reference, created.booking.reference);
    assert_eq!(created.payment.deposit_cents, 6_000);
    assert!(!created.payment.bank.pix_key.is_empty());
}

// Existing booking runs 09:00-11:00.
#[rstest]
#[case("10:30", "4", StatusCode::CONFLICT)]
#[case("08:00", "2", StatusCode::CONFLICT)]
#[case("11:00", "4", StatusCode::CREATED)]
#[case("08:00", "4", StatusCode::CREATED)]
#[tokio::test]
async fn test_create_booking_collision(
    #[case] time: &str,
    #[case] service_id: &str,
    #[case] expected: StatusCode,
) {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    ctx.book(client.id, "2", day(3), "09:00").await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "customer_id": client.id,
            "service_id": service_id,
            "date": day(3),
            "time": time,
        }))
        .await;

    response.assert_status(expected);
}

#[tokio::test]
async fn test_cancelled_booking_frees_its_slot() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    let created = ctx.book(client.id, "2", day(3), "09:00").await;

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", created.booking.id))
        .json(&json!({ "requester_id": client.id }))
        .await
        .assert_status_ok();

    let other = ctx.register_client().await;
    let rebooked = ctx.book(other.id, "4", day(3), "09:30").await;
    assert_eq!(rebooked.booking.start_time.to_string(), "09:30");
}

#[rstest]
#[case("07:30")]
#[case("18:30")]
#[case("19:00")]
#[tokio::test]
async fn test_create_booking_outside_working_hours(#[case] time: &str) {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "customer_id": client.id,
            "service_id": "4",
            "date": day(3),
            "time": time,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_requires_known_customer_and_service() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;

    let unknown_customer = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "customer_id": Uuid::new_v4(),
            "service_id": "4",
            "date": day(3),
            "time": "10:00",
        }))
        .await;
    let unknown_service = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "customer_id": client.id,
            "service_id": "nope",
            "date": day(3),
            "time": "10:00",
        }))
        .await;

    unknown_customer.assert_status(StatusCode::NOT_FOUND);
    unknown_service.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reschedule_excludes_own_slot_and_resets_status() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let client = ctx.register_client().await;
    let created = ctx.book(client.id, "4", day(3), "09:00").await;

    ctx.server
        .post(&format!("/api/admin/bookings/{}/confirm", created.booking.id))
        .json(&json!({ "admin_id": admin.id }))
        .await
        .assert_status_ok();

    // 09:30-11:30 overlaps only the booking being moved.
    let response = ctx
        .server
        .put(&format!("/api/bookings/{}", created.booking.id))
        .json(&json!({
            "customer_id": client.id,
            "service_id": "3",
            "date": day(3),
            "time": "09:30",
        }))
        .await;

    response.assert_status_ok();
    let moved = response.json::<Booking>();
    assert_eq!(moved.id, created.booking.id);
    assert_eq!(moved.reference, created.booking.reference);
    assert_eq!(moved.status, BookingStatus::Pending);
    assert_eq!(moved.service_id, "3");
    assert_eq!(moved.end_time.to_string(), "11:30");
    assert_eq!(moved.total_cents, 15_000);
}

#[tokio::test]
async fn test_reschedule_into_taken_slot_conflicts() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    ctx.book(client.id, "2", day(3), "09:00").await;
    let second = ctx.book(client.id, "4", day(3), "14:00").await;

    let response = ctx
        .server
        .put(&format!("/api/bookings/{}", second.booking.id))
        .json(&json!({
            "customer_id": client.id,
            "date": day(3),
            "time": "10:00",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let stored = ctx
        .server
        .get(&format!("/api/bookings/{}", second.booking.id))
        .await
        .json::<Booking>();
    assert_eq!(stored.start_time.to_string(), "14:00");
}

#[tokio::test]
async fn test_only_owner_can_reschedule() {
    let ctx = TestContext::new();
    let owner = ctx.register_client().await;
    let stranger = ctx.register_client().await;
    let created = ctx.book(owner.id, "4", day(3), "09:00").await;

    let response = ctx
        .server
        .put(&format!("/api/bookings/{}", created.booking.id))
        .json(&json!({
            "customer_id": stranger.id,
            "date": day(4),
            "time": "09:00",
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cancel_permissions() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let owner = ctx.register_client().await;
    let stranger = ctx.register_client().await;
    let first = ctx.book(owner.id, "4", day(3), "09:00").await;

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", first.booking.id))
        .json(&json!({ "requester_id": stranger.id }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", first.booking.id))
        .json(&json!({ "requester_id": admin.id }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Booking>().status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_get_unknown_booking_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/bookings/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<serde_json::Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Resource not found"));
}

#[tokio::test]
async fn test_notify_falls_back_to_link() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    let created = ctx.book(client.id, "4", day(3), "14:30").await;

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/notify", created.booking.id))
        .await;

    response.assert_status_ok();
    match response.json::<NotificationOutcome>() {
        NotificationOutcome::Link { url } => {
            assert!(url.starts_with("https://wa.me/5541900000000?text="));
            assert!(url.contains("03%2F07%2F2025"));
        }
        other => panic!("expected a link, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_store_failure_is_internal_error() {
    let mut bookings = MockBookingStore::new();
    bookings
        .expect_list_bookings_for_date()
        .returning(|_| Err(eyre::eyre!("connection reset")));

    let users = Arc::new(MemoryStore::new());
    let server = TestServer::new(build_router(state_over(Arc::new(bookings), users))).unwrap();

    let response = server
        .get("/api/availability")
        .add_query_param("date", "2025-07-03")
        .add_query_param("service_id", "4")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_booking_rejects_past_days() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;

    for date in [today().pred_opt().unwrap(), NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()] {
        let response = ctx
            .server
            .post("/api/bookings")
            .json(&json!({
                "customer_id": client.id,
                "service_id": "4",
                "date": date,
                "time": "10:00",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    let same_day = ctx.book(client.id, "4", today(), "10:00").await;
    assert_eq!(same_day.booking.date, today());
}

#[tokio::test]
async fn test_reschedule_rejects_past_days() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    let created = ctx.book(client.id, "4", day(3), "09:00").await;

    let response = ctx
        .server
        .put(&format!("/api/bookings/{}", created.booking.id))
        .json(&json!({
            "customer_id": client.id,
            "date": today().pred_opt().unwrap(),
            "time": "09:00",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let stored = ctx
        .server
        .get(&format!("/api/bookings/{}", created.booking.id))
        .await
        .json::<Booking>();
    assert_eq!(stored.date, day(3));
}

#[tokio::test]
async fn test_cancelled_booking_cannot_move_into_taken_slot() {
    let ctx = TestContext::new();
    let client = ctx.register_client().await;
    ctx.book(client.id, "2", day(3), "09:00").await;
    let cancelled = ctx.book(client.id, "4", day(3), "14:00").await;

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", cancelled.booking.id))
        .json(&json!({ "requester_id": client.id }))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .put(&format!("/api/bookings/{}", cancelled.booking.id))
        .json(&json!({
            "customer_id": client.id,
            "date": day(3),
            "time": "10:00",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
