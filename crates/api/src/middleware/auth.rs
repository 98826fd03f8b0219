//! # Authentication Module
//!
//! Password hashing for client and admin accounts, credential checks for
//! login, and the admin gate used by the admin panel endpoints.
//!
//! Passwords are stored as Argon2 PHC strings (algorithm, parameters, salt
//! and hash in one field).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use eyre::Result;
use salonbook_core::{
    errors::{SalonError, SalonResult},
    models::user::{normalize_email, User, UserRole},
};
use salonbook_db::store::UserStore;
use tracing::{debug, info};
use uuid::Uuid;

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call, so hashing the same
/// password twice yields different strings.
///
/// # Example
///
/// ```
/// use salonbook_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("s3cret").unwrap();
/// assert!(verify_password("s3cret", &hashed).unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash
/// cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Invalid stored password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Looks up a user by email and checks the password
///
/// Unknown emails and wrong passwords produce the same
/// `SalonError::Authentication` so callers cannot tell which emails are registered.
pub async fn authenticate(users: &dyn UserStore, email: &str, password: &str) -> SalonResult<User> {
    let user = users
        .get_user_by_email(normalize_email(email))
        .await
        .map_err(SalonError::Database)?;

    let invalid = || SalonError::Authentication("Invalid email or password".to_string());

    let user = user.ok_or_else(invalid)?;
    if !verify_password(password, &user.password_hash).map_err(SalonError::Database)? {
        return Err(invalid());
    }

    debug!("User {} authenticated", user.id);
    Ok(user)
}

/// Loads `admin_id` and fails with `Authorization` unless it is an admin
pub async fn require_admin(users: &dyn UserStore, admin_id: Uuid) -> SalonResult<User> {
    let user = users
        .get_user_by_id(admin_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::Authentication(format!("Unknown user {}", admin_id)))?;

    if !user.is_admin() {
        return Err(SalonError::Authorization(
            "Admin privileges required".to_string(),
        ));
    }

    Ok(user)
}

/// Creates the administrator account if no user holds `email` yet
///
/// An existing account with that email is left untouched, whatever its
/// role.
pub async fn ensure_admin(users: &dyn UserStore, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email);
    if let Some(existing) = users.get_user_by_email(email.clone()).await? {
        debug!("Admin account {} already present", existing.email);
        return Ok(existing);
    }

    let admin = User {
        id: Uuid::new_v4(),
        name: "Administrator".to_string(),
        email,
        phone: String::new(),
        role: UserRole::Admin,
        password_hash: hash_password(password)?,
        created_at: Utc::now(),
    };

    let admin = users.create_user(admin).await?;
    info!("Created admin account {}", admin.email);
    Ok(admin)
}
