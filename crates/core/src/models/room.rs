use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl CreateRoomRequest {
    pub fn validate(&self) -> BookingResult<()> {
        validate_name(&self.name)?;
        validate_capacity(self.capacity)
    }
}

/// Partial update; `None` leaves the stored value untouched.
///
/// `description` distinguishes an absent key (`None`, keep) from an explicit
/// `null` (`Some(None)`, clear).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub capacity: Option<i32>,
    pub equipment: Option<Vec<String>>,
}

impl UpdateRoomRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(capacity) = self.capacity {
            validate_capacity(capacity)?;
        }
        Ok(())
    }
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn validate_name(name: &str) -> BookingResult<()> {
    if name.trim().is_empty() {
        return Err(BookingError::Validation(
            "Room name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> BookingResult<()> {
    if capacity < 1 {
        return Err(BookingError::Validation(format!(
            "Room capacity must be at least 1, got {}",
            capacity
        )));
    }
    Ok(())
}
