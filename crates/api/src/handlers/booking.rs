//! # Booking Handlers
//!
//! Slot boards, reservations for a room, placing and cancelling bookings.
//! The rules live in [`roombook_core::booking::BookingFlow`]; these handlers
//! only translate between HTTP and the flow.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::sync::Arc;
use roombook_core::{
    availability::TimeRange,
    errors::BookingError,
    models::reservation::{
        CreateBookingRequest, Reservation, ReservationWithRoom, SlotBoardResponse,
    },
};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

/// Query parameters for the slot board endpoint
///
/// * `date` - Calendar day, `YYYY-MM-DD`
/// * `tz` - IANA zone the day is read in; the server default when absent
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub tz: Option<String>,
}

fn resolve_timezone(name: Option<&str>, default: Tz) -> Result<Tz, AppError> {
    match name {
        None => Ok(default),
        Some(name) => name.parse::<Tz>().map_err(|_| {
            AppError(BookingError::Validation(format!("Unknown time zone: {}", name)))
        }),
    }
}

/// Lists the day's slots for a room, each flagged available or taken.
///
/// # Endpoint
///
/// ```text
/// GET /api/rooms/:id/slots?date=2026-10-20&tz=Europe/Berlin
/// ```
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotBoardResponse>, AppError> {
    let tz = resolve_timezone(query.tz.as_deref(), state.default_timezone)?;

    let slots = state
        .booking_flow()
        .slot_board(room_id, query.date, &tz, Utc::now())
        .await?;

    Ok(Json(SlotBoardResponse {
        room_id,
        date: query.date,
        timezone: tz.name().to_string(),
        slots,
    }))
}

#[axum::debug_handler]
pub async fn list_room_bookings(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let reservations = state.booking_flow().room_reservations(room_id).await?;
    Ok(Json(reservations))
}

/// Books a room for the caller.
///
/// # Errors
///
/// * `400` - empty or inverted interval, a span that is not one of the
///   day's slots, or a start in the past
/// * `404` - unknown room
/// * `409` - the interval overlaps an existing reservation
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let span = TimeRange::new(payload.start_time, payload.end_time)?;
    let tz = resolve_timezone(payload.tz.as_deref(), state.default_timezone)?;

    let reservation = state
        .booking_flow()
        .book(&user.context(), room_id, span, &tz, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.booking_flow().cancel(&user.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn my_bookings(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<ReservationWithRoom>>, AppError> {
    let reservations = state.booking_flow().my_reservations(&user.context()).await?;
    Ok(Json(reservations))
}
