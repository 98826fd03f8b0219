use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(64) NOT NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'client',
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('client', 'admin'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            reference VARCHAR(16) NOT NULL,
            customer_id UUID NOT NULL REFERENCES users(id),
            service_id VARCHAR(64) NOT NULL,
            booking_date DATE NOT NULL,
            start_minute INTEGER NOT NULL,
            end_minute INTEGER NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            deposit_cents BIGINT NOT NULL,
            total_cents BIGINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_minute_range CHECK (start_minute >= 0 AND end_minute <= 1440),
            CONSTRAINT valid_time_range CHECK (end_minute > start_minute),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'paid', 'completed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_bookings_booking_date ON bookings(booking_date)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_customer_id ON bookings(customer_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
