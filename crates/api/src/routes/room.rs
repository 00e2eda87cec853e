use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/rooms",
            get(handlers::room::list_rooms).post(handlers::room::create_room),
        )
        .route(
            "/api/rooms/:id",
            get(handlers::room::get_room)
                .put(handlers::room::update_room)
                .delete(handlers::room::delete_room),
        )
        .route("/api/me/rooms", get(handlers::room::my_rooms))
}
