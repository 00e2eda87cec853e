use axum::{Json, extract::State};
use std::sync::Arc;
use roombook_core::{
    errors::BookingError,
    models::profile::{Profile, UpdateProfileRequest},
};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

fn missing_profile(id: Uuid) -> AppError {
    AppError(BookingError::NotFound(format!("Profile for user {} not found", id)))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .profiles
        .get_profile(user.0)
        .await?
        .ok_or_else(|| missing_profile(user.0))?;

    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let username = payload.normalized_username()?;
    let profile = state.profiles.upsert_profile(user.0, username).await?;
    Ok(Json(profile))
}
