use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{NaiveDate, Utc};
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use salonbook_api::{
    build_router, calendar::FixedCalendar, middleware::auth::hash_password, ApiState,
};
use salonbook_core::{
    models::{
        booking::CreateBookingResponse,
        service::default_catalog,
        user::{User, UserResponse, UserRole},
    },
    settings::SalonSettings,
};
use salonbook_db::{
    memory::MemoryStore,
    store::{BookingStore, UserStore},
};
use salonbook_notify::{config::NotifyConfig, Notifier};
use serde_json::json;
use uuid::Uuid;

pub const CLIENT_PASSWORD: &str = "unhas-lindas";

/// A server over a fresh in-memory store.
pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_stores(Arc::new(MemoryStore::new()))
    }

    pub fn with_stores(store: Arc<MemoryStore>) -> Self {
        let server = TestServer::new(build_router(state_over(store.clone(), store.clone())))
            .unwrap();
        Self { server, store }
    }

    pub async fn register_client(&self) -> UserResponse {
        let response = self
            .server
            .post("/api/users")
            .json(&json!({
                "name": Name().fake::<String>(),
                "email": SafeEmail().fake::<String>(),
                "phone": "(41) 99876-5432",
                "password": CLIENT_PASSWORD,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<UserResponse>()
    }

    /// Admins are never created over HTTP; they go straight into the store.
    pub async fn create_admin(&self) -> User {
        let admin = User {
            id: Uuid::new_v4(),
            name: "Salon Admin".to_string(),
            email: format!("admin-{}@salon.example", Uuid::new_v4()),
            phone: String::new(),
            role: UserRole::Admin,
            password_hash: hash_password("admin-password").unwrap(),
            created_at: Utc::now(),
        };
        self.store.create_user(admin).await.unwrap()
    }

    pub async fn book(
        &self,
        customer_id: Uuid,
        service_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> CreateBookingResponse {
        let response = self
            .server
            .post("/api/bookings")
            .json(&json!({
                "customer_id": customer_id,
                "service_id": service_id,
                "date": date,
                "time": time,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<CreateBookingResponse>()
    }
}

pub fn state_over(bookings: Arc<dyn BookingStore>, users: Arc<dyn UserStore>) -> Arc<ApiState> {
    Arc::new(ApiState {
        bookings,
        users,
        catalog: default_catalog(),
        settings: SalonSettings::default(),
        notifier: Notifier::new(NotifyConfig {
            recipient: "5541900000000".to_string(),
            ..NotifyConfig::default()
        }),
        calendar: Arc::new(FixedCalendar(today())),
    })
}

/// The date the test server treats as today.
pub fn today() -> NaiveDate {
    day(1)
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}
