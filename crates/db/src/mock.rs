//! mockall doubles for the core store traits, shared by the API tests.

use async_trait::async_trait;
use eyre::Result;
use mockall::mock;
use roombook_core::{
    models::{
        profile::Profile,
        reservation::{NewReservation, Reservation, ReservationWithRoom},
        room::{CreateRoomRequest, Room, UpdateRoomRequest},
    },
    store::{InsertOutcome, ProfileStore, ReservationStore, RoomStore},
};
use uuid::Uuid;

mock! {
    pub ReservationStore {}

    #[async_trait]
    impl ReservationStore for ReservationStore {
        async fn list_reservations(&self, room_id: Uuid) -> Result<Vec<Reservation>>;

        async fn list_user_reservations(&self, user_id: Uuid) -> Result<Vec<ReservationWithRoom>>;

        async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>>;

        async fn create_reservation(&self, reservation: NewReservation) -> Result<InsertOutcome>;

        async fn delete_reservation(&self, id: Uuid) -> Result<()>;
    }
}

mock! {
    pub RoomStore {}

    #[async_trait]
    impl RoomStore for RoomStore {
        async fn list_rooms(&self) -> Result<Vec<Room>>;

        async fn list_rooms_by_owner(&self, owner_id: Uuid) -> Result<Vec<Room>>;

        async fn get_room(&self, id: Uuid) -> Result<Option<Room>>;

        async fn create_room(&self, owner_id: Uuid, room: CreateRoomRequest) -> Result<Room>;

        async fn update_room(&self, id: Uuid, changes: UpdateRoomRequest) -> Result<Room>;

        async fn delete_room(&self, id: Uuid) -> Result<()>;
    }
}

mock! {
    pub ProfileStore {}

    #[async_trait]
    impl ProfileStore for ProfileStore {
        async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>>;

        async fn upsert_profile(&self, id: Uuid, username: Option<String>) -> Result<Profile>;
    }
}
