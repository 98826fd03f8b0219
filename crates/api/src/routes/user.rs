use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users", post(handlers::user::register_user))
        .route("/api/users/login", post(handlers::user::login))
        .route(
            "/api/users/:id/bookings",
            get(handlers::user::list_user_bookings),
        )
}
