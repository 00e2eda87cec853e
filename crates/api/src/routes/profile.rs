use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/me/profile",
        get(handlers::profile::get_profile).put(handlers::profile::update_profile),
    )
}
