use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/rooms/:id/slots", get(handlers::booking::get_slots))
        .route(
            "/api/rooms/:id/bookings",
            get(handlers::booking::list_room_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/api/bookings/:id",
            delete(handlers::booking::cancel_booking),
        )
        .route("/api/me/bookings", get(handlers::booking::my_bookings))
}
