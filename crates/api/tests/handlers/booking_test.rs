use axum::http::StatusCode;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use roombook_core::{
    models::reservation::{
        CreateBookingRequest, NewReservation, Reservation, ReservationWithRoom, SlotBoardResponse,
    },
    store::InsertOutcome,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, at, booking_day, reservation, room, user_header};

#[tokio::test]
async fn test_slot_board_flags_booked_hours() {
    let mut ctx = TestContext::new();
    let room_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    ctx.rooms
        .expect_get_room()
        .times(1)
        .returning(move |id| Ok(Some(room(id, owner))));
    ctx.reservations
        .expect_list_reservations()
        .times(1)
        .returning(move |room_id| {
            Ok(vec![reservation(room_id, Uuid::new_v4(), at(10, 0), at(12, 0))])
        });

    let server = ctx.into_server();
    let response = server
        .get(&format!("/api/rooms/{}/slots", room_id))
        .add_query_param("date", booking_day())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let board: SlotBoardResponse = response.json();
    assert_eq!(board.room_id, room_id);
    assert_eq!(board.timezone, "UTC");
    assert_eq!(board.slots.len(), 12);

    let taken: Vec<&str> = board
        .slots
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.slot.label.as_str())
        .collect();
    assert_eq!(taken, vec!["10:00", "11:00"]);
}

#[tokio::test]
async fn test_slot_board_in_requested_time_zone() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();

    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, owner))));
    ctx.reservations
        .expect_list_reservations()
        .returning(|_| Ok(vec![]));

    let server = ctx.into_server();
    let response = server
        .get(&format!("/api/rooms/{}/slots", Uuid::new_v4()))
        .add_query_param("date", booking_day())
        .add_query_param("tz", "Europe/Berlin")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let board: SlotBoardResponse = response.json();
    assert_eq!(board.timezone, "Europe/Berlin");
    assert_eq!(board.slots[0].slot.label, "9:00");
    // CET, UTC+1 in January
    assert_eq!(
        board.slots[0].slot.start,
        Utc.with_ymd_and_hms(2030, 1, 15, 8, 0, 0).unwrap()
    );
    assert!(board.slots.iter().all(|s| s.available));
}

#[tokio::test]
async fn test_slot_board_rejects_unknown_time_zone() {
    let server = TestContext::new().into_server();

    let response = server
        .get(&format!("/api/rooms/{}/slots", Uuid::new_v4()))
        .add_query_param("date", booking_day())
        .add_query_param("tz", "Mars/Olympus_Mons")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slot_board_for_unknown_room() {
    let mut ctx = TestContext::new();
    ctx.rooms.expect_get_room().returning(|_| Ok(None));

    let server = ctx.into_server();
    let response = server
        .get(&format!("/api/rooms/{}/slots", Uuid::new_v4()))
        .add_query_param("date", booking_day())
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_bookings_are_sorted_by_start() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();

    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, owner))));
    ctx.reservations
        .expect_list_reservations()
        .returning(|room_id| {
            Ok(vec![
                reservation(room_id, Uuid::new_v4(), at(15, 0), at(16, 0)),
                reservation(room_id, Uuid::new_v4(), at(9, 0), at(10, 0)),
            ])
        });

    let server = ctx.into_server();
    let response = server
        .get(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let bookings: Vec<Reservation> = response.json();
    assert_eq!(bookings[0].start_time, at(9, 0));
    assert_eq!(bookings[1].start_time, at(15, 0));
}

#[tokio::test]
async fn test_create_booking_success() {
    let mut ctx = TestContext::new();
    let room_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, Uuid::new_v4()))));
    ctx.reservations
        .expect_list_reservations()
        .returning(move |room_id| {
            Ok(vec![reservation(room_id, Uuid::new_v4(), at(10, 0), at(11, 0))])
        });
    ctx.reservations
        .expect_create_reservation()
        .withf(move |new: &NewReservation| {
            new.room_id == room_id
                && new.user_id == user_id
                && new.span.start() == at(11, 0)
                && new.span.end() == at(12, 0)
        })
        .times(1)
        .returning(|new| {
            Ok(InsertOutcome::Created(reservation(
                new.room_id,
                new.user_id,
                new.span.start(),
                new.span.end(),
            )))
        });

    let (name, value) = user_header(user_id);
    let server = ctx.into_server();
    let response = server
        .post(&format!("/api/rooms/{}/bookings", room_id))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: at(11, 0),
            end_time: at(12, 0),
            tz: None,
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Reservation = response.json();
    assert_eq!(created.room_id, room_id);
    assert_eq!(created.user_id, user_id);
    assert_eq!(created.end_time - created.start_time, Duration::hours(1));
}

#[tokio::test]
async fn test_create_booking_overlapping_existing_is_a_conflict() {
    let mut ctx = TestContext::new();

    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, Uuid::new_v4()))));
    ctx.reservations
        .expect_list_reservations()
        .returning(move |room_id| {
            Ok(vec![reservation(room_id, Uuid::new_v4(), at(10, 0), at(11, 0))])
        });
    ctx.reservations.expect_create_reservation().never();

    let (name, value) = user_header(Uuid::new_v4());
    let server = ctx.into_server();
    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: at(10, 0),
            end_time: at(11, 0),
            tz: None,
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Booking conflict"));
}

#[tokio::test]
async fn test_create_booking_lost_race_is_a_conflict() {
    let mut ctx = TestContext::new();

    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, Uuid::new_v4()))));
    ctx.reservations
        .expect_list_reservations()
        .returning(|_| Ok(vec![]));
    ctx.reservations
        .expect_create_reservation()
        .times(1)
        .returning(|_| Ok(InsertOutcome::Overlapping));

    let (name, value) = user_header(Uuid::new_v4());
    let server = ctx.into_server();
    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: at(14, 0),
            end_time: at(15, 0),
            tz: None,
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_booking_with_inverted_interval() {
    let (name, value) = user_header(Uuid::new_v4());
    let server = TestContext::new().into_server();

    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&json!({
            "start_time": at(12, 0),
            "end_time": at(11, 0),
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_in_the_past() {
    let (name, value) = user_header(Uuid::new_v4());
    let server = TestContext::new().into_server();
    let yesterday = (Utc::now() - Duration::days(1)).date_naive();
    let start = yesterday.and_hms_opt(10, 0, 0).unwrap().and_utc();

    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: start,
            end_time: start + Duration::hours(1),
            tz: None,
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("in the past"));
}

#[rstest]
#[case::off_the_hour(at(9, 17), at(10, 17))]
#[case::several_slots(at(9, 0), at(13, 0))]
#[case::years_long(at(9, 0), at(9, 0) + Duration::days(3650))]
#[case::outside_opening_hours(at(22, 0), at(23, 0))]
#[tokio::test]
async fn test_create_booking_rejects_spans_that_are_not_slots(
    #[case] start: DateTime<Utc>,
    #[case] end: DateTime<Utc>,
) {
    let mut ctx = TestContext::new();
    ctx.reservations.expect_create_reservation().never();

    let (name, value) = user_header(Uuid::new_v4());
    let server = ctx.into_server();
    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: start,
            end_time: end,
            tz: None,
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not a bookable slot"));
}

#[tokio::test]
async fn test_create_booking_on_local_grid_of_requested_zone() {
    let mut ctx = TestContext::new();

    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, Uuid::new_v4()))));
    ctx.reservations
        .expect_list_reservations()
        .returning(|_| Ok(vec![]));
    ctx.reservations
        .expect_create_reservation()
        .times(1)
        .returning(|new| {
            Ok(InsertOutcome::Created(reservation(
                new.room_id,
                new.user_id,
                new.span.start(),
                new.span.end(),
            )))
        });

    let (name, value) = user_header(Uuid::new_v4());
    let server = ctx.into_server();
    // 9:00 in Berlin, CET in January
    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: at(8, 0),
            end_time: at(9, 0),
            tz: Some("Europe/Berlin".to_string()),
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_booking_with_unknown_time_zone() {
    let (name, value) = user_header(Uuid::new_v4());
    let server = TestContext::new().into_server();

    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .add_header(name, value)
        .json(&CreateBookingRequest {
            start_time: at(9, 0),
            end_time: at(10, 0),
            tz: Some("Nowhere/Atlantis".to_string()),
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_requires_identity() {
    let server = TestContext::new().into_server();

    let response = server
        .post(&format!("/api/rooms/{}/bookings", Uuid::new_v4()))
        .json(&CreateBookingRequest {
            start_time: at(9, 0),
            end_time: at(10, 0),
            tz: None,
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cancel_own_booking() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let booking = reservation(Uuid::new_v4(), user_id, at(9, 0), at(10, 0));
    let booking_id = booking.id;

    ctx.reservations
        .expect_get_reservation()
        .returning(move |_| Ok(Some(booking.clone())));
    ctx.reservations
        .expect_delete_reservation()
        .withf(move |id| *id == booking_id)
        .times(1)
        .returning(|_| Ok(()));

    let (name, value) = user_header(user_id);
    let server = ctx.into_server();
    let response = server
        .delete(&format!("/api/bookings/{}", booking_id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_room_owner_can_cancel_any_booking_in_their_room() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();
    let booking = reservation(Uuid::new_v4(), Uuid::new_v4(), at(9, 0), at(10, 0));

    ctx.reservations
        .expect_get_reservation()
        .returning(move |_| Ok(Some(booking.clone())));
    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, owner))));
    ctx.reservations
        .expect_delete_reservation()
        .times(1)
        .returning(|_| Ok(()));

    let (name, value) = user_header(owner);
    let server = ctx.into_server();
    let response = server
        .delete(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_stranger_cannot_cancel_booking() {
    let mut ctx = TestContext::new();
    let booking = reservation(Uuid::new_v4(), Uuid::new_v4(), at(9, 0), at(10, 0));

    ctx.reservations
        .expect_get_reservation()
        .returning(move |_| Ok(Some(booking.clone())));
    ctx.rooms
        .expect_get_room()
        .returning(move |id| Ok(Some(room(id, Uuid::new_v4()))));
    ctx.reservations.expect_delete_reservation().never();

    let (name, value) = user_header(Uuid::new_v4());
    let server = ctx.into_server();
    let response = server
        .delete(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cancel_unknown_booking() {
    let mut ctx = TestContext::new();
    ctx.reservations
        .expect_get_reservation()
        .returning(|_| Ok(None));

    let (name, value) = user_header(Uuid::new_v4());
    let server = ctx.into_server();
    let response = server
        .delete(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_bookings_lists_callers_reservations() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    ctx.reservations
        .expect_list_user_reservations()
        .withf(move |id| *id == user_id)
        .returning(|user_id| {
            Ok(vec![ReservationWithRoom {
                reservation: reservation(Uuid::new_v4(), user_id, at(9, 0), at(10, 0)),
                room_name: Some("Studio A".to_string()),
            }])
        });

    let (name, value) = user_header(user_id);
    let server = ctx.into_server();
    let response = server.get("/api/me/bookings").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body[0]["room_name"], "Studio A");
    assert_eq!(body[0]["user_id"], user_id.to_string());
}
