use chrono::{DateTime, Utc};
use roombook_core::models::{
    profile::Profile,
    reservation::{Reservation, ReservationWithRoom},
    room::Room,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservationWithRoom {
    #[sqlx(flatten)]
    pub reservation: DbReservation,
    pub room_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub id: Uuid,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Room {
            id: row.id,
            name: row.name,
            description: row.description,
            capacity: row.capacity,
            equipment: row.equipment,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbReservation> for Reservation {
    fn from(row: DbReservation) -> Self {
        Reservation {
            id: row.id,
            room_id: row.room_id,
            user_id: row.user_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbReservationWithRoom> for ReservationWithRoom {
    fn from(row: DbReservationWithRoom) -> Self {
        ReservationWithRoom {
            reservation: row.reservation.into(),
            room_name: row.room_name,
        }
    }
}

impl From<DbProfile> for Profile {
    fn from(row: DbProfile) -> Self {
        Profile {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
