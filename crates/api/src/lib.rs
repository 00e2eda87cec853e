//! # Roombook API
//!
//! The API crate provides the web server for the Roombook practice-room
//! booking service: browsing rooms, reading slot boards, booking and
//! cancelling, and managing one's own room listings and profile.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into store and booking-flow calls
//! - **Middleware**: Caller identity extraction and error mapping
//! - **Config**: Environment-driven settings
//!
//! Persistence sits behind the `roombook-core` store traits, so the router
//! can be built over Postgres or over test doubles.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication context and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use chrono_tz::Tz;
use eyre::Result;
use roombook_core::{
    booking::BookingFlow,
    slots::SlotConfig,
    store::{ProfileStore, ReservationStore, RoomStore},
};
use roombook_db::{DbPool, PgStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub rooms: Arc<dyn RoomStore>,
    pub reservations: Arc<dyn ReservationStore>,
    pub profiles: Arc<dyn ProfileStore>,
    /// Shape of the bookable day
    pub slots: SlotConfig,
    /// Zone used for slot boards when the request names none
    pub default_timezone: Tz,
    /// Header carrying the authenticated user id
    pub auth_header: HeaderName,
}

impl ApiState {
    /// State backed by a single Postgres pool.
    pub fn from_pool(db_pool: DbPool, config: &config::ApiConfig) -> Self {
        let store = Arc::new(PgStore::new(db_pool));
        Self {
            rooms: store.clone(),
            reservations: store.clone(),
            profiles: store,
            slots: config.slots,
            default_timezone: config.default_timezone,
            auth_header: config.auth_header.clone(),
        }
    }

    pub fn booking_flow(&self) -> BookingFlow<'_> {
        BookingFlow::new(self.rooms.as_ref(), self.reservations.as_ref()).with_slots(self.slots)
    }
}

/// Builds the router with every endpoint, without server-level layers.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Room listing endpoints
        .merge(routes::room::routes())
        // Slot boards and bookings
        .merge(routes::booking::routes())
        // Caller profile
        .merge(routes::profile::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs logging, wires routes over Postgres-backed stores, applies CORS,
/// tracing and timeout layers, then serves until the process stops.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_pool(db_pool, &config));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
                config.auth_header.clone(),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (slots: {} min, {}:00-{}:00, tz {})",
        addr,
        config.slots.duration_minutes,
        config.slots.first_hour,
        config.slots.last_hour,
        config.default_timezone
    );
    axum::serve(listener, app).await?;

    Ok(())
}
