//! # SalonBook API
//!
//! The API crate provides the web server for the SalonBook booking service.
//! It defines RESTful endpoints for the service catalog, client accounts,
//! slot availability, bookings and the admin panel.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Authentication helpers and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the store traits from `salonbook-db`, so the router
//! built by [`build_router`] runs unchanged over PostgreSQL or the
//! in-memory store.

/// Source of the current date
pub mod calendar;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Authentication helpers and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use crate::calendar::{Calendar, SystemCalendar};
use salonbook_core::{
    errors::SalonError,
    models::service::{default_catalog, find_service, Service},
    settings::SalonSettings,
};
use salonbook_db::{
    store::{BookingStore, PgStore, UserStore},
    DbPool,
};
use salonbook_notify::Notifier;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use salonbook_api::{build_router, calendar::SystemCalendar, ApiState};
/// use salonbook_core::{models::service::default_catalog, settings::SalonSettings};
/// use salonbook_db::memory::MemoryStore;
/// use salonbook_notify::{config::NotifyConfig, Notifier};
///
/// let store = Arc::new(MemoryStore::new());
/// let state = ApiState {
///     bookings: store.clone(),
///     users: store,
///     catalog: default_catalog(),
///     settings: SalonSettings::default(),
///     notifier: Notifier::new(NotifyConfig::default()),
///     calendar: Arc::new(SystemCalendar),
/// };
/// let app = build_router(Arc::new(state));
/// ```
pub struct ApiState {
    pub bookings: Arc<dyn BookingStore>,
    pub users: Arc<dyn UserStore>,
    /// Services offered by the salon
    pub catalog: Vec<Service>,
    pub settings: SalonSettings,
    pub notifier: Notifier,
    /// Bookings before `calendar.today()` are refused
    pub calendar: Arc<dyn Calendar>,
}

impl ApiState {
    /// Looks up a catalog entry, failing with `NotFound` for unknown ids
    pub fn find_service(&self, service_id: &str) -> Result<&Service, SalonError> {
        find_service(&self.catalog, service_id)
            .ok_or_else(|| SalonError::NotFound(format!("Service '{}' not found", service_id)))
    }
}

/// Assembles every route group over the shared state
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Service catalog endpoints
        .merge(routes::catalog::routes())
        // Registration, login and the client dashboard
        .merge(routes::user::routes())
        // Free slot lookup
        .merge(routes::availability::routes())
        // Booking lifecycle endpoints
        .merge(routes::booking::routes())
        // Admin panel endpoints
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// Sets up logging, seeds the admin account when configured, wires the
/// PostgreSQL store into the router and serves until the process stops.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = salonbook_api::config::ApiConfig::from_env()?;
/// let db_pool = salonbook_db::create_pool(&config.database_url).await?;
/// salonbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = Arc::new(PgStore::new(db_pool));

    if let Some(admin) = &config.admin {
        middleware::auth::ensure_admin(&*store, &admin.email, &admin.password)
            .await
            .wrap_err("Failed to create the admin account")?;
    }

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        bookings: store.clone(),
        users: store,
        catalog: default_catalog(),
        settings: config.salon.clone(),
        notifier: Notifier::new(config.notify.clone()),
        calendar: Arc::new(SystemCalendar),
    });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
