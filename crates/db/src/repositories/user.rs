use crate::models::DbUser;
use eyre::Result;
use salonbook_core::models::user::User;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(pool: &Pool<Postgres>, user: &User) -> Result<User> {
    tracing::debug!("Creating user: id={}, role={}", user.id, user.role);

    let row = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, phone, role, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, email, phone, role, password_hash, created_at
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(user.role.as_str())
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(pool)
    .await?;

    User::try_from(row)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, phone, role, password_hash, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

/// Looks a user up by an already-normalized email.
pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, phone, role, password_hash, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

pub async fn list_users(pool: &Pool<Postgres>) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, phone, role, password_hash, created_at
        FROM users
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(User::try_from).collect()
}
