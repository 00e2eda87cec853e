//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Roombook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `BOOKING_SLOT_MINUTES`: Length of a bookable slot (default: 60)
//! - `BOOKING_FIRST_HOUR` / `BOOKING_LAST_HOUR`: First and last slot start hour (default: 9 and 20)
//! - `BOOKING_DEFAULT_TZ`: IANA time zone for slot boards when the caller names none (default: "UTC")
//! - `AUTH_USER_HEADER`: Header carrying the authenticated user id (default: "x-user-id")

use std::env;

use axum::http::HeaderName;
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use roombook_core::slots::{DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR, DEFAULT_SLOT_MINUTES, SlotConfig};
use tracing::Level;

pub const DEFAULT_AUTH_HEADER: &str = "x-user-id";

/// Configuration for the Roombook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use roombook_api::config::ApiConfig;
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

    /// Shape of the bookable day
    pub slots: SlotConfig,

    /// Zone used to anchor slot boards by default
    pub default_timezone: Tz,

    /// Header the upstream identity gateway fills with the user id
    pub auth_header: HeaderName,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric setting cannot be parsed
    /// - The slot settings describe an impossible day
    /// - The default time zone or auth header name is invalid
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match var("LOG_LEVEL", "info").as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        // Booking settings
        let slots = SlotConfig {
            duration_minutes: var("BOOKING_SLOT_MINUTES", &DEFAULT_SLOT_MINUTES.to_string())
                .parse()
                .wrap_err("Invalid BOOKING_SLOT_MINUTES value")?,
            first_hour: var("BOOKING_FIRST_HOUR", &DEFAULT_FIRST_HOUR.to_string())
                .parse()
                .wrap_err("Invalid BOOKING_FIRST_HOUR value")?,
            last_hour: var("BOOKING_LAST_HOUR", &DEFAULT_LAST_HOUR.to_string())
                .parse()
                .wrap_err("Invalid BOOKING_LAST_HOUR value")?,
        };
        slots.validate().map_err(|e| eyre!("Invalid booking slot settings: {}", e))?;

        let timezone_name = var("BOOKING_DEFAULT_TZ", "UTC");
        let default_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| eyre!("Invalid BOOKING_DEFAULT_TZ value: {}", timezone_name))?;

        // Security settings
        let auth_header =
            HeaderName::try_from(var("AUTH_USER_HEADER", DEFAULT_AUTH_HEADER).to_ascii_lowercase())
            .wrap_err("Invalid AUTH_USER_HEADER value")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            slots,
            default_timezone,
            auth_header,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
