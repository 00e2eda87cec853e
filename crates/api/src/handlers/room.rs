use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use roombook_core::{
    errors::BookingError,
    models::room::{CreateRoomRequest, Room, UpdateRoomRequest},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

async fn find_room(state: &ApiState, id: Uuid) -> Result<Room, AppError> {
    state
        .rooms
        .get_room(id)
        .await?
        .ok_or_else(|| AppError(BookingError::NotFound(format!("Room with ID {} not found", id))))
}

/// Loads the room and checks that `user` listed it.
async fn find_owned_room(state: &ApiState, id: Uuid, user: AuthUser) -> Result<Room, AppError> {
    let room = find_room(state, id).await?;
    if !room.is_owned_by(user.0) {
        return Err(AppError(BookingError::Authorization(
            "Only the room owner can change this room".to_string(),
        )));
    }
    Ok(room)
}

#[axum::debug_handler]
pub async fn list_rooms(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.rooms.list_rooms().await?))
}

#[axum::debug_handler]
pub async fn get_room(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Room>, AppError> {
    Ok(Json(find_room(&state, id).await?))
}

#[axum::debug_handler]
pub async fn my_rooms(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.rooms.list_rooms_by_owner(user.0).await?))
}

#[axum::debug_handler]
pub async fn create_room(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    payload.validate()?;

    let room = state.rooms.create_room(user.0, payload).await?;
    info!("Room created: id={}, owner={}", room.id, user.0);

    Ok((StatusCode::CREATED, Json(room)))
}

#[axum::debug_handler]
pub async fn update_room(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, AppError> {
    payload.validate()?;
    find_owned_room(&state, id, user).await?;

    let room = state.rooms.update_room(id, payload).await?;
    Ok(Json(room))
}

#[axum::debug_handler]
pub async fn delete_room(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_owned_room(&state, id, user).await?;

    state.rooms.delete_room(id).await?;
    info!("Room deleted: id={}, owner={}", id, user.0);

    Ok(StatusCode::NO_CONTENT)
}
