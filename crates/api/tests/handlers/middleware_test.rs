use axum::{http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use roombook_api::middleware::error_handling::AppError;
use roombook_core::errors::BookingError;
use uuid::Uuid;

use crate::test_utils::TestContext;

#[rstest]
#[case(BookingError::NotFound("room".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::Authentication("who".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("no".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::Database(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_server_error() {
    let error = AppError::from(eyre::eyre!("connection refused"));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_identity_header_is_rejected() {
    let server = TestContext::new().into_server();

    let response = server
        .get("/api/me/bookings")
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_static("not-a-uuid"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_failure_is_a_server_error() {
    let mut ctx = TestContext::new();
    ctx.rooms
        .expect_get_room()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let server = ctx.into_server();
    let response = server.get(&format!("/api/rooms/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let server = TestContext::new().into_server();
    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["status"], "ok");
}
