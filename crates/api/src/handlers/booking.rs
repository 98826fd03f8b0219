//! # Booking Handlers
//!
//! Create, inspect, reschedule, cancel and announce bookings.
//!
//! Every write follows the same sequence: load the day's bookings, run the
//! collision checker, then persist. The check and the write are separate
//! store calls, so two clients racing for the same slot can both succeed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use salonbook_core::{
    availability::is_available,
    clock::ClockTime,
    errors::{SalonError, SalonResult},
    models::{
        booking::{
            Booking, CancelBookingRequest, CreateBookingRequest, CreateBookingResponse,
            RescheduleBookingRequest,
        },
        service::Service,
        user::User,
    },
};
use salonbook_notify::NotificationOutcome;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

pub(crate) async fn load_booking(state: &ApiState, id: Uuid) -> SalonResult<Booking> {
    state
        .bookings
        .get_booking(id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Booking with ID {} not found", id)))
}

pub(crate) async fn load_user(state: &ApiState, id: Uuid) -> SalonResult<User> {
    state
        .users
        .get_user_by_id(id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("User with ID {} not found", id)))
}

/// Rejects past days, slots outside working hours and slots taken by
/// another active booking.
async fn ensure_slot_free(
    state: &ApiState,
    service: &Service,
    date: NaiveDate,
    start: ClockTime,
    exclude_id: Option<Uuid>,
) -> SalonResult<()> {
    let today = state.calendar.today();
    if date < today {
        return Err(SalonError::Validation(format!(
            "Cannot book {}, the earliest bookable day is {}",
            date, today
        )));
    }

    let hours = state.settings.working_hours;
    if !hours.fits(start.minutes(), service.duration_minutes) {
        return Err(SalonError::Validation(format!(
            "{} for {} minutes falls outside working hours {:02}:00-{:02}:00",
            start, service.duration_minutes, hours.start_hour(), hours.end_hour()
        )));
    }

    let bookings = state
        .bookings
        .list_bookings_for_date(date)
        .await
        .map_err(SalonError::Database)?;

    if !is_available(
        date,
        start.minutes(),
        service.duration_minutes,
        &bookings,
        exclude_id,
    ) {
        return Err(SalonError::Conflict(format!(
            "The slot {} on {} is already taken",
            start, date
        )));
    }

    Ok(())
}

/// Reserves a slot and returns the deposit instructions
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
///
/// # Errors
///
/// * `SalonError::NotFound` - Unknown customer or service
/// * `SalonError::Validation` - Past day, or slot outside working hours
/// * `SalonError::Conflict` - Slot collides with an active booking
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    load_user(&state, request.customer_id).await?;
    let service = state.find_service(&request.service_id)?;

    ensure_slot_free(&state, service, request.date, request.time, None).await?;

    let booking = Booking::new(
        request.customer_id,
        service,
        request.date,
        request.time,
        state.settings.deposit_percent,
    )?;
    let booking = state
        .bookings
        .insert_booking(booking)
        .await
        .map_err(SalonError::Database)?;

    info!(
        "Booking {} ({}) created for {} at {}",
        booking.reference, booking.id, booking.date, booking.start_time
    );

    let payment = booking.payment_instructions(state.settings.bank.clone());
    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse { booking, payment }),
    ))
}

/// `GET /api/bookings/:id`
#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(load_booking(&state, id).await?))
}

/// Moves a booking to another slot, optionally for another service
///
/// Only the booking's owner may reschedule. The booking's own slot does not
/// block the move, and the booking returns to `pending`.
///
/// ```text
/// PUT /api/bookings/:id
/// ```
#[axum::debug_handler]
pub async fn reschedule_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RescheduleBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let mut booking = load_booking(&state, id).await?;
    if booking.customer_id != request.customer_id {
        return Err(AppError(SalonError::Authorization(
            "Only the client who made the booking can reschedule it".to_string(),
        )));
    }
    booking.ensure_reschedulable()?;

    let service_id = request
        .service_id
        .unwrap_or_else(|| booking.service_id.clone());
    let service = state.find_service(&service_id)?;

    ensure_slot_free(&state, service, request.date, request.time, Some(id)).await?;

    booking.reschedule(
        service,
        request.date,
        request.time,
        state.settings.deposit_percent,
    )?;
    let booking = state
        .bookings
        .replace_booking(booking)
        .await
        .map_err(SalonError::Database)?;

    info!(
        "Booking {} moved to {} at {}",
        booking.id, booking.date, booking.start_time
    );
    Ok(Json(booking))
}

/// Cancels a booking on behalf of its owner or an admin
///
/// ```text
/// POST /api/bookings/:id/cancel
/// ```
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let mut booking = load_booking(&state, id).await?;
    let requester = load_user(&state, request.requester_id).await?;

    if requester.id != booking.customer_id && !requester.is_admin() {
        return Err(AppError(SalonError::Authorization(
            "Only the client or an admin can cancel this booking".to_string(),
        )));
    }

    booking.cancel()?;
    let booking = state
        .bookings
        .replace_booking(booking)
        .await
        .map_err(SalonError::Database)?;

    info!("Booking {} cancelled by {}", booking.id, requester.id);
    Ok(Json(booking))
}

/// Tells the salon about a booking over WhatsApp
///
/// Responds with `{"method":"api"}` when the Cloud API delivered the message,
/// or `{"method":"link","url":...}` with a click-to-chat link otherwise.
///
/// ```text
/// POST /api/bookings/:id/notify
/// ```
#[axum::debug_handler]
pub async fn notify_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationOutcome>, AppError> {
    let booking = load_booking(&state, id).await?;
    let client = load_user(&state, booking.customer_id).await?;
    let service = state.find_service(&booking.service_id)?;

    let outcome = state
        .notifier
        .send_booking_notification(&booking, &client, service)
        .await;

    debug!("Notification for booking {}: {:?}", booking.id, outcome);
    Ok(Json(outcome))
}
