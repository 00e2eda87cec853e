//! Postgres-backed implementations of the core store traits.

use async_trait::async_trait;
use eyre::Result;
use roombook_core::{
    models::{
        profile::Profile,
        reservation::{NewReservation, Reservation, ReservationWithRoom},
        room::{CreateRoomRequest, Room, UpdateRoomRequest},
    },
    store::{InsertOutcome, ProfileStore, ReservationStore, RoomStore},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

/// One pool, three stores.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn list_reservations(&self, room_id: Uuid) -> Result<Vec<Reservation>> {
        let rows = repositories::reservation::get_reservations_by_room_id(&self.pool, room_id).await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn list_user_reservations(&self, user_id: Uuid) -> Result<Vec<ReservationWithRoom>> {
        let rows = repositories::reservation::get_reservations_by_user_id(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(ReservationWithRoom::from).collect())
    }

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        let row = repositories::reservation::get_reservation_by_id(&self.pool, id).await?;
        Ok(row.map(Reservation::from))
    }

    async fn create_reservation(&self, reservation: NewReservation) -> Result<InsertOutcome> {
        let row = repositories::reservation::create_reservation(
            &self.pool,
            reservation.room_id,
            reservation.user_id,
            reservation.span.start(),
            reservation.span.end(),
        )
        .await?;

        Ok(match row {
            Some(row) => InsertOutcome::Created(row.into()),
            None => InsertOutcome::Overlapping,
        })
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        repositories::reservation::delete_reservation(&self.pool, id).await
    }
}

#[async_trait]
impl RoomStore for PgStore {
    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let rows = repositories::room::get_rooms(&self.pool).await?;
        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn list_rooms_by_owner(&self, owner_id: Uuid) -> Result<Vec<Room>> {
        let rows = repositories::room::get_rooms_by_owner_id(&self.pool, owner_id).await?;
        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn get_room(&self, id: Uuid) -> Result<Option<Room>> {
        let row = repositories::room::get_room_by_id(&self.pool, id).await?;
        Ok(row.map(Room::from))
    }

    async fn create_room(&self, owner_id: Uuid, room: CreateRoomRequest) -> Result<Room> {
        let row = repositories::room::create_room(
            &self.pool,
            owner_id,
            room.name.trim(),
            room.description.as_deref(),
            room.capacity,
            &room.equipment,
        )
        .await?;
        Ok(row.into())
    }

    async fn update_room(&self, id: Uuid, changes: UpdateRoomRequest) -> Result<Room> {
        let row = repositories::room::update_room(
            &self.pool,
            id,
            changes.name.as_deref().map(str::trim),
            changes.description.as_ref().map(Option::as_deref),
            changes.capacity,
            changes.equipment.as_deref(),
        )
        .await?;
        Ok(row.into())
    }

    async fn delete_room(&self, id: Uuid) -> Result<()> {
        repositories::room::delete_room(&self.pool, id).await
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        let row = repositories::profile::get_profile_by_id(&self.pool, id).await?;
        Ok(row.map(Profile::from))
    }

    async fn upsert_profile(&self, id: Uuid, username: Option<String>) -> Result<Profile> {
        let row = repositories::profile::upsert_profile(&self.pool, id, username.as_deref()).await?;
        Ok(row.into())
    }
}
