//! # User Handlers
//!
//! Client registration, login and the client's own booking list.
//!
//! Login only checks credentials and returns the account; there are no
//! sessions or tokens. Later requests identify the caller by id in the
//! request body or query.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use salonbook_core::{
    errors::SalonError,
    models::{
        booking::{sort_chronologically, Booking},
        user::{normalize_email, LoginRequest, RegisterUserRequest, User, UserResponse, UserRole},
    },
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{authenticate, hash_password},
        error_handling::AppError,
    },
    ApiState,
};

/// Registers a new client account
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// ```
///
/// # Errors
///
/// * `SalonError::Validation` - Missing name or password, malformed email
/// * `SalonError::Conflict` - Email already registered
#[axum::debug_handler]
pub async fn register_user(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    request.validate()?;

    let email = normalize_email(&request.email);
    if state
        .users
        .get_user_by_email(email.clone())
        .await
        .map_err(SalonError::Database)?
        .is_some()
    {
        return Err(AppError(SalonError::Conflict(format!(
            "Email '{}' is already registered",
            email
        ))));
    }

    let user = User {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        email,
        phone: request.phone.trim().to_string(),
        role: UserRole::Client,
        password_hash: hash_password(&request.password).map_err(|e| SalonError::Internal(e.into()))?,
        created_at: Utc::now(),
    };

    let user = state
        .users
        .create_user(user)
        .await
        .map_err(SalonError::Database)?;

    info!("Registered client {}", user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Checks credentials and returns the account
///
/// ```text
/// POST /api/users/login
/// ```
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = authenticate(state.users.as_ref(), &request.email, &request.password).await?;
    Ok(Json(user.into()))
}

/// Client dashboard: every booking of `id`, earliest first
///
/// ```text
/// GET /api/users/:id/bookings
/// ```
#[axum::debug_handler]
pub async fn list_user_bookings(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    state
        .users
        .get_user_by_id(id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("User with ID {} not found", id)))?;

    let mut bookings = state
        .bookings
        .list_bookings_for_customer(id)
        .await
        .map_err(SalonError::Database)?;
    sort_chronologically(&mut bookings);

    debug!("User {} has {} bookings", id, bookings.len());
    Ok(Json(bookings))
}
