//! Candidate booking slots for a single calendar day.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::{TimeRange, is_slot_available};
use crate::errors::{BookingError, BookingResult};
use crate::models::reservation::Reservation;

pub const DEFAULT_SLOT_MINUTES: u32 = 60;
pub const DEFAULT_FIRST_HOUR: u32 = 9;
pub const DEFAULT_LAST_HOUR: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn range(&self) -> BookingResult<TimeRange> {
        TimeRange::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(flatten)]
    pub slot: TimeSlot,
    pub available: bool,
}

/// Shape of the bookable day: slot length and the first/last slot start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub duration_minutes: u32,
    pub first_hour: u32,
    pub last_hour: u32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_SLOT_MINUTES,
            first_hour: DEFAULT_FIRST_HOUR,
            last_hour: DEFAULT_LAST_HOUR,
        }
    }
}

impl SlotConfig {
    pub fn validate(&self) -> BookingResult<()> {
        if self.duration_minutes == 0 {
            return Err(BookingError::Validation(
                "Slot duration must be positive".to_string(),
            ));
        }
        if self.last_hour > 23 {
            return Err(BookingError::Validation(format!(
                "Last slot hour must be between 0 and 23, got {}",
                self.last_hour
            )));
        }
        if self.first_hour > self.last_hour {
            return Err(BookingError::Validation(format!(
                "First slot hour {} is after last slot hour {}",
                self.first_hour, self.last_hour
            )));
        }
        Ok(())
    }

    /// Accepts `span` only if it is exactly one of the slots offered on its
    /// local day in `tz`.
    pub fn ensure_offered<Tz: TimeZone>(&self, span: &TimeRange, tz: &Tz) -> BookingResult<()> {
        let date = span.start().with_timezone(tz).date_naive();
        let offered = generate_slots_in(
            date,
            tz,
            self.duration_minutes,
            self.first_hour,
            self.last_hour,
        )?;

        if offered
            .iter()
            .any(|slot| slot.start == span.start() && slot.end == span.end())
        {
            return Ok(());
        }

        Err(BookingError::Validation(format!(
            "Requested time {} - {} is not a bookable slot; slots last {} minutes and start between {}:00 and {}:00",
            span.start().to_rfc3339(),
            span.end().to_rfc3339(),
            self.duration_minutes,
            self.first_hour,
            self.last_hour
        )))
    }
}

/// Slots for `date` in UTC, starting at `start_hour:00` and stepping by
/// `duration_minutes` up to and including a start of `end_hour:00`.
pub fn generate_slots(
    date: NaiveDate,
    duration_minutes: u32,
    start_hour: u32,
    end_hour: u32,
) -> BookingResult<Vec<TimeSlot>> {
    generate_slots_in(date, &Utc, duration_minutes, start_hour, end_hour)
}

/// Same as [`generate_slots`], with hours read as wall-clock time in `tz`.
///
/// Local times skipped by a DST transition produce no slot; ambiguous ones
/// resolve to the earlier instant.
pub fn generate_slots_in<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
    duration_minutes: u32,
    start_hour: u32,
    end_hour: u32,
) -> BookingResult<Vec<TimeSlot>> {
    let config = SlotConfig {
        duration_minutes,
        first_hour: start_hour,
        last_hour: end_hour,
    };
    config.validate()?;

    let step = Duration::minutes(i64::from(duration_minutes));
    let invalid_hour = || BookingError::Validation(format!("Invalid slot hour for {}", date));
    let mut local = date.and_hms_opt(start_hour, 0, 0).ok_or_else(invalid_hour)?;
    let last = date.and_hms_opt(end_hour, 0, 0).ok_or_else(invalid_hour)?;

    let mut slots: Vec<TimeSlot> = Vec::new();
    while local <= last {
        if let Some(start) = tz.from_local_datetime(&local).earliest() {
            let start = start.with_timezone(&Utc);
            let increasing = slots.last().is_none_or(|prev| prev.start < start);
            if increasing {
                slots.push(TimeSlot {
                    label: format!("{}:{:02}", local.hour(), local.minute()),
                    start,
                    end: start + step,
                });
            }
        }
        local += step;
    }

    Ok(slots)
}

/// Flags every slot with whether it is free of `existing` reservations.
pub fn annotate_slots(slots: Vec<TimeSlot>, existing: &[Reservation]) -> Vec<SlotAvailability> {
    slots
        .into_iter()
        .map(|slot| {
            let available = slot
                .range()
                .map(|range| is_slot_available(&range, existing))
                .unwrap_or(false);
            SlotAvailability { slot, available }
        })
        .collect()
}
