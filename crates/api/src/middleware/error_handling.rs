//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint of the SalonBook API fails the same way:
//!
//! | error            | status |
//! |------------------|--------|
//! | `NotFound`       | 404    |
//! | `Validation`     | 400    |
//! | `Conflict`       | 409    |
//! | `Authentication` | 401    |
//! | `Authorization`  | 403    |
//! | `Database`       | 500    |
//! | `Internal`       | 500    |
//!
//! The body is always `{ "error": "<message>" }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salonbook_core::errors::SalonError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `SalonError` and implements `IntoResponse`, so handlers
/// can return `Result<_, AppError>` and use `?` on both domain results and
/// store results.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use salonbook_api::middleware::error_handling::AppError;
/// use salonbook_core::errors::SalonError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(SalonError::NotFound("Booking".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SalonError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SalonError::NotFound(_) => StatusCode::NOT_FOUND,
            SalonError::Validation(_) => StatusCode::BAD_REQUEST,
            SalonError::Conflict(_) => StatusCode::CONFLICT,
            SalonError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SalonError::Authorization(_) => StatusCode::FORBIDDEN,
            SalonError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<SalonError> for AppError {
    fn from(err: SalonError) -> Self {
        AppError(err)
    }
}

/// Store failures surface as `SalonError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SalonError::Database(err))
    }
}

/// Maps a SalonError straight to an HTTP response
pub fn map_error(err: SalonError) -> Response {
    AppError(err).into_response()
}
