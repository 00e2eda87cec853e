//! # Booking Flow
//!
//! Ties the slot generator and availability checker to the stores: build the
//! slot board for a room and day, place a reservation, cancel one.
//!
//! The availability check here is advisory. A reservation written by someone
//! else between the check and the insert is caught by the store, which answers
//! [`InsertOutcome::Overlapping`]; both paths end in [`BookingError::Conflict`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    availability::{TimeRange, ensure_slot_available},
    errors::{BookingError, BookingResult},
    models::{
        reservation::{NewReservation, Reservation, ReservationWithRoom},
        room::Room,
    },
    slots::{SlotAvailability, SlotConfig, annotate_slots, generate_slots_in},
    store::{InsertOutcome, ReservationStore, RoomStore},
};

/// Identity of the caller, passed explicitly into every mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingContext {
    pub user_id: Uuid,
}

impl BookingContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

pub struct BookingFlow<'a> {
    rooms: &'a dyn RoomStore,
    reservations: &'a dyn ReservationStore,
    slots: SlotConfig,
}

impl<'a> BookingFlow<'a> {
    /// Flow over the default day shape (hourly, 9:00 through 20:00).
    pub fn new(rooms: &'a dyn RoomStore, reservations: &'a dyn ReservationStore) -> Self {
        Self {
            rooms,
            reservations,
            slots: SlotConfig::default(),
        }
    }

    /// Shape of the day used both for slot boards and for accepting bookings.
    pub fn with_slots(mut self, slots: SlotConfig) -> Self {
        self.slots = slots;
        self
    }

    async fn require_room(&self, room_id: Uuid) -> BookingResult<Room> {
        self.rooms
            .get_room(room_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", room_id)))
    }

    /// Every slot of `date` (wall clock in `tz`) with its availability.
    ///
    /// Slots starting before `now` are flagged taken, as `book` would refuse them.
    pub async fn slot_board<Tz: TimeZone>(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<SlotAvailability>> {
        let slots = generate_slots_in(
            date,
            tz,
            self.slots.duration_minutes,
            self.slots.first_hour,
            self.slots.last_hour,
        )?;

        self.require_room(room_id).await?;
        let existing = self.reservations.list_reservations(room_id).await?;
        debug!(
            "Building slot board: room={}, date={}, slots={}, reservations={}",
            room_id,
            date,
            slots.len(),
            existing.len()
        );

        let mut board = annotate_slots(slots, &existing);
        for entry in board.iter_mut().filter(|entry| entry.slot.start < now) {
            entry.available = false;
        }
        Ok(board)
    }

    pub async fn room_reservations(&self, room_id: Uuid) -> BookingResult<Vec<Reservation>> {
        self.require_room(room_id).await?;
        let mut reservations = self.reservations.list_reservations(room_id).await?;
        reservations.sort_by_key(|r| r.start_time);
        Ok(reservations)
    }

    /// Reserves `span` in `room_id` for the caller.
    ///
    /// `span` must be one of the slots the board offers for its day in `tz`.
    /// `now` stands in for the clock: spans starting before it are rejected.
    pub async fn book<Tz: TimeZone>(
        &self,
        ctx: &BookingContext,
        room_id: Uuid,
        span: TimeRange,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> BookingResult<Reservation> {
        self.slots.ensure_offered(&span, tz)?;
        if span.start() < now {
            return Err(BookingError::Validation(format!(
                "Cannot book a slot starting in the past ({})",
                span.start().to_rfc3339()
            )));
        }

        self.require_room(room_id).await?;
        let existing = self.reservations.list_reservations(room_id).await?;
        ensure_slot_available(&span, &existing)?;

        let outcome = self
            .reservations
            .create_reservation(NewReservation {
                room_id,
                user_id: ctx.user_id,
                span,
            })
            .await?;

        match outcome {
            InsertOutcome::Created(reservation) => {
                info!(
                    "Reservation created: id={}, room={}, user={}",
                    reservation.id, room_id, ctx.user_id
                );
                Ok(reservation)
            }
            InsertOutcome::Overlapping => {
                warn!(
                    "Reservation rejected by store as overlapping: room={}, user={}",
                    room_id, ctx.user_id
                );
                Err(BookingError::Conflict(format!(
                    "Requested time {} - {} was booked by someone else",
                    span.start().to_rfc3339(),
                    span.end().to_rfc3339()
                )))
            }
        }
    }

    /// Cancels a reservation. Allowed for the reserving user and the room owner.
    pub async fn cancel(&self, ctx: &BookingContext, reservation_id: Uuid) -> BookingResult<()> {
        let reservation = self
            .reservations
            .get_reservation(reservation_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Reservation with ID {} not found", reservation_id))
            })?;

        if reservation.user_id != ctx.user_id {
            let owns_room = self
                .rooms
                .get_room(reservation.room_id)
                .await?
                .is_some_and(|room| room.is_owned_by(ctx.user_id));
            if !owns_room {
                return Err(BookingError::Authorization(
                    "Only the booking user or the room owner can cancel this reservation"
                        .to_string(),
                ));
            }
        }

        self.reservations.delete_reservation(reservation_id).await?;
        info!(
            "Reservation cancelled: id={}, by={}",
            reservation_id, ctx.user_id
        );
        Ok(())
    }

    pub async fn my_reservations(
        &self,
        ctx: &BookingContext,
    ) -> BookingResult<Vec<ReservationWithRoom>> {
        Ok(self
            .reservations
            .list_user_reservations(ctx.user_id)
            .await?)
    }
}
