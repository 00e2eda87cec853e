//! # Authentication Context
//!
//! Sign-in is handled by an external identity provider. The gateway in front
//! of this API verifies the session and forwards the user id in a header
//! (`x-user-id` unless configured otherwise). [`AuthUser`] turns that header
//! into an explicit value handlers pass on to the booking flow.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use roombook_core::{booking::BookingContext, errors::BookingError};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// The authenticated caller. Rejects the request with 401 when the identity
/// header is missing or does not hold a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    pub fn context(&self) -> BookingContext {
        BookingContext::new(self.0)
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(&state.auth_header).ok_or_else(|| {
            AppError(BookingError::Authentication(
                "Sign in required".to_string(),
            ))
        })?;

        let user_id = value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or_else(|| {
                AppError(BookingError::Authentication(
                    "Malformed user identity".to_string(),
                ))
            })?;

        Ok(AuthUser(user_id))
    }
}
