use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Report};
use salonbook_core::{
    clock::ClockTime,
    models::{booking::Booking, user::User},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub reference: String,
    pub customer_id: Uuid,
    pub service_id: String,
    pub booking_date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
    pub status: String,
    pub deposit_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

fn clock_from_column(minutes: i32) -> Result<ClockTime, Report> {
    u32::try_from(minutes)
        .ok()
        .and_then(ClockTime::from_minutes)
        .ok_or_else(|| eyre!("Stored minute-of-day {} is out of range", minutes))
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            reference: row.reference,
            customer_id: row.customer_id,
            service_id: row.service_id,
            date: row.booking_date,
            start_time: clock_from_column(row.start_minute)?,
            end_time: clock_from_column(row.end_minute)?,
            status: row.status.parse()?,
            deposit_cents: row.deposit_cents,
            total_cents: row.total_cents,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbUser> for User {
    type Error = Report;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            role: row.role.parse()?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}
