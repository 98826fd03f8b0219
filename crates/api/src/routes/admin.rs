use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/bookings",
            get(handlers::admin::list_all_bookings),
        )
        .route("/api/admin/users", get(handlers::admin::list_all_users))
        .route(
            "/api/admin/bookings/:id/confirm",
            post(handlers::admin::confirm_deposit),
        )
        .route(
            "/api/admin/bookings/:id/complete",
            post(handlers::admin::complete_booking),
        )
}
