//! # Admin Handlers
//!
//! The salon's panel: every booking on the calendar, the client base,
//! deposit confirmation and marking appointments as done. Each request names the acting admin
//! and is rejected with 403 when that user is not an admin.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use salonbook_core::{
    errors::SalonError,
    models::{
        booking::{
            AdminActionRequest, AdminBookingEntry, AdminBookingsResponse, Booking, BookingStatus,
        },
        user::{User, UserResponse},
    },
};
use serde::Deserialize;
use std::{cmp::Reverse, collections::HashMap, sync::Arc};
use tracing::info;
use uuid::Uuid;

use crate::{
    handlers::booking::load_booking,
    middleware::{auth::require_admin, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub admin_id: Uuid,
}

/// All bookings, most recent day first, plus how many still await a deposit
///
/// ```text
/// GET /api/admin/bookings?admin_id=<uuid>
/// ```
#[axum::debug_handler]
pub async fn list_all_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<AdminBookingsResponse>, AppError> {
    require_admin(state.users.as_ref(), query.admin_id).await?;

    let mut bookings = state
        .bookings
        .list_bookings()
        .await
        .map_err(SalonError::Database)?;
    bookings.sort_by_key(|booking| (Reverse(booking.date), booking.start_time));

    let awaiting_deposit = bookings
        .iter()
        .filter(|booking| booking.status == BookingStatus::Pending)
        .count();

    let clients: HashMap<Uuid, User> = state
        .users
        .list_users()
        .await
        .map_err(SalonError::Database)?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    let bookings = bookings
        .into_iter()
        .map(|booking| {
            let client = clients.get(&booking.customer_id);
            AdminBookingEntry {
                client_name: client.map(|c| c.name.clone()),
                client_phone: client.map(|c| c.phone.clone()),
                booking,
            }
        })
        .collect();

    Ok(Json(AdminBookingsResponse {
        bookings,
        awaiting_deposit,
    }))
}

/// The client base: every registered account, ordered by name
///
/// ```text
/// GET /api/admin/users?admin_id=<uuid>
/// ```
#[axum::debug_handler]
pub async fn list_all_users(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    require_admin(state.users.as_ref(), query.admin_id).await?;

    let mut users = state
        .users
        .list_users()
        .await
        .map_err(SalonError::Database)?;
    users.sort_by_key(|user| user.name.to_lowercase());

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Marks the deposit as received
///
/// Confirming an already paid booking is a no-op.
///
/// ```text
/// POST /api/admin/bookings/:id/confirm
/// ```
#[axum::debug_handler]
pub async fn confirm_deposit(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdminActionRequest>,
) -> Result<Json<Booking>, AppError> {
    require_admin(state.users.as_ref(), request.admin_id).await?;
    let mut booking = load_booking(&state, id).await?;

    if !booking.confirm_deposit()? {
        return Ok(Json(booking));
    }

    let booking = state
        .bookings
        .replace_booking(booking)
        .await
        .map_err(SalonError::Database)?;

    info!("Deposit confirmed for booking {}", booking.reference);
    Ok(Json(booking))
}

/// `POST /api/admin/bookings/:id/complete`
#[axum::debug_handler]
pub async fn complete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdminActionRequest>,
) -> Result<Json<Booking>, AppError> {
    require_admin(state.users.as_ref(), request.admin_id).await?;
    let mut booking = load_booking(&state, id).await?;

    booking.complete()?;
    let booking = state
        .bookings
        .replace_booking(booking)
        .await
        .map_err(SalonError::Database)?;

    info!("Booking {} completed", booking.reference);
    Ok(Json(booking))
}
