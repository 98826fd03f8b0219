use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::booking::create_booking))
        .route(
            "/api/bookings/:id",
            get(handlers::booking::get_booking).put(handlers::booking::reschedule_booking),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/api/bookings/:id/notify",
            post(handlers::booking::notify_booking),
        )
}
