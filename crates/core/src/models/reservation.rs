use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::TimeRange;
use crate::slots::SlotAvailability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Half-open overlap test against `[range.start, range.end)`.
    pub fn overlaps(&self, range: &TimeRange) -> bool {
        range.start() < self.end_time && range.end() > self.start_time
    }
}

/// Fields the caller supplies when booking; the store assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub span: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationWithRoom {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub room_name: Option<String>,
}

/// Body of a booking request. `tz` names the zone whose slot grid the span is
/// taken from; the server default applies when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotBoardResponse {
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub timezone: String,
    pub slots: Vec<SlotAvailability>,
}
