use crate::models::DbBooking;
use chrono::NaiveDate;
use eyre::{eyre, Result};
use salonbook_core::models::booking::Booking;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const BOOKING_COLUMNS: &str = "id, reference, customer_id, service_id, booking_date, \
     start_minute, end_minute, status, deposit_cents, total_cents, created_at";

fn into_bookings(rows: Vec<DbBooking>) -> Result<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

pub async fn insert_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<Booking> {
    tracing::debug!(
        "Inserting booking: id={}, date={}, start={}, end={}",
        booking.id, booking.date, booking.start_time, booking.end_time
    );

    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings ({BOOKING_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(booking.id)
    .bind(&booking.reference)
    .bind(booking.customer_id)
    .bind(&booking.service_id)
    .bind(booking.date)
    .bind(booking.start_time.minutes() as i32)
    .bind(booking.end_time.minutes() as i32)
    .bind(booking.status.as_str())
    .bind(booking.deposit_cents)
    .bind(booking.total_cents)
    .bind(booking.created_at)
    .fetch_one(pool)
    .await?;

    Booking::try_from(row)
}

/// Overwrites every mutable field of an existing booking.
pub async fn replace_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<Booking> {
    tracing::debug!(
        "Replacing booking: id={}, status={}",
        booking.id, booking.status
    );

    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET service_id = $2, booking_date = $3, start_minute = $4, end_minute = $5,
            status = $6, deposit_cents = $7, total_cents = $8
        WHERE id = $1
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(booking.id)
    .bind(&booking.service_id)
    .bind(booking.date)
    .bind(booking.start_time.minutes() as i32)
    .bind(booking.end_time.minutes() as i32)
    .bind(booking.status.as_str())
    .bind(booking.deposit_cents)
    .bind(booking.total_cents)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Booking {} not found", booking.id))?;

    Booking::try_from(row)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Booking>> {
    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Booking::try_from).transpose()
}

pub async fn list_bookings_for_date(pool: &Pool<Postgres>, date: NaiveDate) -> Result<Vec<Booking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE booking_date = $1
        ORDER BY start_minute ASC
        "#
    ))
    .bind(date)
    .fetch_all(pool)
    .await?;

    into_bookings(rows)
}

pub async fn list_bookings(pool: &Pool<Postgres>) -> Result<Vec<Booking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        ORDER BY booking_date ASC, start_minute ASC
        "#
    ))
    .fetch_all(pool)
    .await?;

    into_bookings(rows)
}

pub async fn list_bookings_for_customer(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<Booking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE customer_id = $1
        ORDER BY booking_date ASC, start_minute ASC
        "#
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    into_bookings(rows)
}
