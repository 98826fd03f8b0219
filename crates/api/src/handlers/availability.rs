//! # Availability Handlers
//!
//! Answers "which start times are still free on this day for this service".
//!
//! ## Slot Grid
//!
//! 1. Resolve the service to get its duration
//! 2. Load every booking stored for the requested date
//! 3. Walk the working-hours grid and run the collision checker on each
//!    candidate start, skipping cancelled bookings and the optional
//!    `exclude` booking (the one being rescheduled)
//!
//! Candidates whose appointment would run past closing time are not listed.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use salonbook_core::{
    availability::{slot_grid, AvailabilityResponse},
    errors::SalonError,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
///
/// * `date` - Day to inspect, `YYYY-MM-DD`
/// * `service_id` - Catalog id of the requested service
/// * `exclude` - Booking to ignore, used while rescheduling it
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub service_id: String,
    pub exclude: Option<Uuid>,
}

/// Lists every grid slot of the day with its availability
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?date=2025-07-03&service_id=1&exclude=<booking uuid>
/// ```
///
/// # Errors
///
/// * `SalonError::NotFound` - Unknown service
/// * `SalonError::Database` - Store failure
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let service = state.find_service(&query.service_id)?;

    let bookings = state
        .bookings
        .list_bookings_for_date(query.date)
        .await
        .map_err(SalonError::Database)?;

    let slots = slot_grid(
        state.settings.working_hours,
        query.date,
        service.duration_minutes,
        &bookings,
        query.exclude,
    );

    debug!(
        "{} of {} slots free on {} for service {}",
        slots.iter().filter(|slot| slot.available).count(),
        slots.len(),
        query.date,
        service.id
    );

    Ok(Json(AvailabilityResponse {
        date: query.date,
        service_id: service.id.clone(),
        duration_minutes: service.duration_minutes,
        slots,
    }))
}
