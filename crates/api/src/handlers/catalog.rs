use axum::{
    extract::{Path, State},
    Json,
};
use salonbook_core::models::service::Service;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// `GET /api/services`
pub async fn list_services(State(state): State<Arc<ApiState>>) -> Json<Vec<Service>> {
    Json(state.catalog.clone())
}

/// `GET /api/services/:id`
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Service>, AppError> {
    Ok(Json(state.find_service(&id)?.clone()))
}
