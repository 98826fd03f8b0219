use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use salonbook_core::models::{booking::Booking, user::User};
use uuid::Uuid;

use crate::store::{BookingStore, UserStore};

// Mock stores for testing
mock! {
    pub BookingStore {}

    #[async_trait]
    impl BookingStore for BookingStore {
        async fn list_bookings_for_date(&self, date: NaiveDate) -> eyre::Result<Vec<Booking>>;

        async fn insert_booking(&self, booking: Booking) -> eyre::Result<Booking>;

        async fn replace_booking(&self, booking: Booking) -> eyre::Result<Booking>;

        async fn get_booking(&self, id: Uuid) -> eyre::Result<Option<Booking>>;

        async fn list_bookings(&self) -> eyre::Result<Vec<Booking>>;

        async fn list_bookings_for_customer(&self, customer_id: Uuid) -> eyre::Result<Vec<Booking>>;
    }
}

mock! {
    pub UserStore {}

    #[async_trait]
    impl UserStore for UserStore {
        async fn create_user(&self, user: User) -> eyre::Result<User>;

        async fn get_user_by_id(&self, id: Uuid) -> eyre::Result<Option<User>>;

        async fn get_user_by_email(&self, email: String) -> eyre::Result<Option<User>>;

        async fn list_users(&self) -> eyre::Result<Vec<User>>;
    }
}
