use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{eyre, Result};
use salonbook_core::models::{
    booking::{sort_chronologically, Booking},
    user::User,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{BookingStore, UserStore};

/// In-process store keyed by record id. Contents are lost on shutdown.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: RwLock<HashMap<Uuid, Booking>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_bookings(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let bookings = self.bookings.read().await;
        let mut matching: Vec<Booking> = bookings.values().filter(|b| keep(b)).cloned().collect();
        sort_chronologically(&mut matching);
        matching
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        Ok(self.collect_bookings(|booking| booking.date == date).await)
    }

    async fn insert_booking(&self, booking: Booking) -> Result<Booking> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.id) {
            return Err(eyre!("Booking {} already exists", booking.id));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn replace_booking(&self, booking: Booking) -> Result<Booking> {
        let mut bookings = self.bookings.write().await;
        let slot = bookings
            .get_mut(&booking.id)
            .ok_or_else(|| eyre!("Booking {} not found", booking.id))?;
        *slot = booking.clone();
        Ok(booking)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.collect_bookings(|_| true).await)
    }

    async fn list_bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>> {
        Ok(self
            .collect_bookings(|booking| booking.customer_id == customer_id)
            .await)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(eyre!("A user with email {} already exists", user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: String) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }
}
