use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
}

impl UpdateProfileRequest {
    /// Trims the username and checks its length. A blank username clears it.
    pub fn normalized_username(&self) -> BookingResult<Option<String>> {
        let Some(username) = self.username.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if username.is_empty() {
            return Ok(None);
        }

        let len = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(BookingError::Validation(format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN, USERNAME_MAX
            )));
        }
        Ok(Some(username.to_string()))
    }
}
