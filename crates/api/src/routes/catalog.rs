use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/services/:id", get(handlers::catalog::get_service))
}
