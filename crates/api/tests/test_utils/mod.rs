use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use roombook_api::ApiState;
use roombook_core::{
    models::{reservation::Reservation, room::Room},
    slots::SlotConfig,
};
use roombook_db::mock::{MockProfileStore, MockReservationStore, MockRoomStore};
use uuid::Uuid;

pub const USER_HEADER: &str = "x-user-id";

/// Mocks for every store; set expectations, then turn into a server.
pub struct TestContext {
    pub rooms: MockRoomStore,
    pub reservations: MockReservationStore,
    pub profiles: MockProfileStore,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            rooms: MockRoomStore::new(),
            reservations: MockReservationStore::new(),
            profiles: MockProfileStore::new(),
        }
    }

    pub fn into_server(self) -> TestServer {
        let state = Arc::new(ApiState {
            rooms: Arc::new(self.rooms),
            reservations: Arc::new(self.reservations),
            profiles: Arc::new(self.profiles),
            slots: SlotConfig::default(),
            default_timezone: Tz::UTC,
            auth_header: HeaderName::from_static(USER_HEADER),
        });

        TestServer::new(roombook_api::app(state)).expect("Failed to build test server")
    }
}

pub fn user_header(user_id: Uuid) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(USER_HEADER),
        HeaderValue::from_str(&user_id.to_string()).unwrap(),
    )
}

/// A day safely in the future so bookings on it are never "in the past".
pub fn booking_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 15).unwrap()
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 15, hour, minute, 0).unwrap()
}

pub fn room(id: Uuid, owner_id: Uuid) -> Room {
    Room {
        id,
        name: "Studio A".to_string(),
        description: Some("Grand piano, treated walls".to_string()),
        capacity: 4,
        equipment: vec!["piano".to_string(), "music stand".to_string()],
        owner_id: Some(owner_id),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn reservation(
    room_id: Uuid,
    user_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        room_id,
        user_id,
        start_time: start,
        end_time: end,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
