//! # Availability
//!
//! Conflict detection between a proposed booking and the reservations already
//! stored for the same room. Intervals are half-open, `[start, end)`, so a
//! booking that ends exactly when another begins does not conflict with it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::reservation::Reservation;

/// A non-empty, half-open time interval.
///
/// The only way to build one is through [`TimeRange::new`] (or deserializing,
/// which goes through the same check), so every value upholds `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = BookingError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Builds a range, rejecting empty and inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::Validation(format!(
                "Start time {} must be before end time {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Range of `duration` beginning at `start`. Fails for non-positive durations.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> BookingResult<Self> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Returns `true` when `candidate` overlaps none of `existing`.
///
/// `existing` must already be narrowed to a single room; it need not be sorted.
pub fn is_slot_available(candidate: &TimeRange, existing: &[Reservation]) -> bool {
    find_conflict(candidate, existing).is_none()
}

/// First reservation in `existing` that overlaps `candidate`, if any.
pub fn find_conflict<'a>(
    candidate: &TimeRange,
    existing: &'a [Reservation],
) -> Option<&'a Reservation> {
    existing.iter().find(|reservation| reservation.overlaps(candidate))
}

/// Like [`is_slot_available`], but reports the clashing reservation as a
/// [`BookingError::Conflict`].
pub fn ensure_slot_available(candidate: &TimeRange, existing: &[Reservation]) -> BookingResult<()> {
    match find_conflict(candidate, existing) {
        Some(reservation) => Err(BookingError::Conflict(format!(
            "Requested time {} - {} overlaps reservation {} ({} - {})",
            candidate.start.to_rfc3339(),
            candidate.end.to_rfc3339(),
            reservation.id,
            reservation.start_time.to_rfc3339(),
            reservation.end_time.to_rfc3339()
        ))),
        None => Ok(()),
    }
}
