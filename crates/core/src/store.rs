//! Persistence seams used by the booking flow and the HTTP layer.
//!
//! Implementations report their own failures through `eyre`; callers fold
//! those into [`crate::errors::BookingError::Database`].

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    profile::Profile,
    reservation::{NewReservation, Reservation, ReservationWithRoom},
    room::{CreateRoomRequest, Room, UpdateRoomRequest},
};

/// Result of asking the store to persist a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Created(Reservation),
    /// The store refused the row because it overlaps an existing reservation
    /// for the same room, e.g. one written concurrently.
    Overlapping,
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn list_reservations(&self, room_id: Uuid) -> Result<Vec<Reservation>>;

    /// The user's reservations joined with room names, earliest first.
    async fn list_user_reservations(&self, user_id: Uuid) -> Result<Vec<ReservationWithRoom>>;

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>>;

    async fn create_reservation(&self, reservation: NewReservation) -> Result<InsertOutcome>;

    async fn delete_reservation(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>>;

    async fn list_rooms_by_owner(&self, owner_id: Uuid) -> Result<Vec<Room>>;

    async fn get_room(&self, id: Uuid) -> Result<Option<Room>>;

    async fn create_room(&self, owner_id: Uuid, room: CreateRoomRequest) -> Result<Room>;

    async fn update_room(&self, id: Uuid, changes: UpdateRoomRequest) -> Result<Room>;

    async fn delete_room(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Creates the profile on first write.
    async fn upsert_profile(&self, id: Uuid, username: Option<String>) -> Result<Profile>;
}
