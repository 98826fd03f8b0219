//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SalonBook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `WORKING_HOURS_START` / `WORKING_HOURS_END`: Opening and closing hour (default: 8 / 19)
//! - `SLOT_MINUTES`: Granularity of the bookable grid (default: 30)
//! - `DEPOSIT_PERCENT`: Share of the price due up front (default: 30)
//! - `BANK_OWNER`, `BANK_NAME`, `BANK_AGENCY`, `BANK_ACCOUNT`, `PIX_KEY`: Deposit account
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: When both are set, an admin account is ensured at startup
//!
//! Notification settings are read by [`salonbook_notify::config::NotifyConfig::from_env`].

use eyre::{eyre, Result, WrapErr};
use salonbook_core::{
    availability::WorkingHours,
    settings::{BankDetails, SalonSettings, DEFAULT_DEPOSIT_PERCENT},
};
use salonbook_notify::config::NotifyConfig;
use std::{env, str::FromStr};
use tracing::Level;

/// Credentials for the administrator account created on startup
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

/// Configuration for the SalonBook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use salonbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Working hours, deposit share and bank details
    pub salon: SalonSettings,

    /// Administrator to ensure at startup (optional)
    pub admin: Option<AdminSeed>,

    /// WhatsApp notification settings
    pub notify: NotifyConfig,
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, defaulting to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric variable cannot be parsed
    /// - The working hours do not describe a valid window
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = var_or("API_PORT", 3000u16)?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = var_or("API_REQUEST_TIMEOUT_SECONDS", 30u64)?;

        // Salon settings
        let defaults = WorkingHours::default();
        let working_hours = WorkingHours::new(
            var_or("WORKING_HOURS_START", defaults.start_hour())?,
            var_or("WORKING_HOURS_END", defaults.end_hour())?,
            var_or("SLOT_MINUTES", defaults.slot_minutes())?,
        )
        .wrap_err("Invalid working hours configuration")?;

        let deposit_percent = var_or("DEPOSIT_PERCENT", DEFAULT_DEPOSIT_PERCENT)?;
        if deposit_percent > 100 {
            return Err(eyre!("DEPOSIT_PERCENT must be between 0 and 100"));
        }

        let bank_defaults = BankDetails::default();
        let bank = BankDetails {
            owner: env::var("BANK_OWNER").unwrap_or(bank_defaults.owner),
            bank: env::var("BANK_NAME").unwrap_or(bank_defaults.bank),
            agency: env::var("BANK_AGENCY").unwrap_or(bank_defaults.agency),
            account: env::var("BANK_ACCOUNT").unwrap_or(bank_defaults.account),
            pix_key: env::var("PIX_KEY").unwrap_or(bank_defaults.pix_key),
        };

        // Admin bootstrap
        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(AdminSeed { email, password })
            }
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            salon: SalonSettings {
                working_hours,
                deposit_percent,
                bank,
            },
            admin,
            notify: NotifyConfig::from_env(),
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
