//! # Store Interfaces
//!
//! Storage contracts used by the booking workflow. The API only ever talks
//! to these traits, so the same handlers run against PostgreSQL in
//! production and against [`crate::memory::MemoryStore`] in tests.
//!
//! None of the operations lock anything. A caller that checks availability
//! and then inserts can race another caller doing the same thing.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use salonbook_core::models::{booking::Booking, user::User};
use uuid::Uuid;

use crate::{repositories, DbPool};

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Every booking on `date`, cancelled ones included, ordered by start time.
    async fn list_bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>>;

    async fn insert_booking(&self, booking: Booking) -> Result<Booking>;

    /// Replaces the stored booking with the same id. Fails if none exists.
    async fn replace_booking(&self, booking: Booking) -> Result<Booking>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>>;

    async fn list_bookings(&self) -> Result<Vec<Booking>>;

    async fn list_bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// `email` must already be normalized.
    async fn get_user_by_email(&self, email: String) -> Result<Option<User>>;

    async fn list_users(&self) -> Result<Vec<User>>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        repositories::booking::list_bookings_for_date(&self.pool, date).await
    }

    async fn insert_booking(&self, booking: Booking) -> Result<Booking> {
        repositories::booking::insert_booking(&self.pool, &booking).await
    }

    async fn replace_booking(&self, booking: Booking) -> Result<Booking> {
        repositories::booking::replace_booking(&self.pool, &booking).await
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        repositories::booking::get_booking_by_id(&self.pool, id).await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        repositories::booking::list_bookings(&self.pool).await
    }

    async fn list_bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>> {
        repositories::booking::list_bookings_for_customer(&self.pool, customer_id).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: User) -> Result<User> {
        repositories::user::create_user(&self.pool, &user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        repositories::user::get_user_by_id(&self.pool, id).await
    }

    async fn get_user_by_email(&self, email: String) -> Result<Option<User>> {
        repositories::user::get_user_by_email(&self.pool, &email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        repositories::user::list_users(&self.pool).await
    }
}
