use crate::models::{DbReservation, DbReservationWithRoom};
use crate::schema::EXCLUSION_VIOLATION;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// `None` when the row would overlap another reservation of the same room.
pub async fn create_reservation(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    user_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Option<DbReservation>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating reservation: id={}, room={}, user={}, start={}, end={}",
        id, room_id, user_id, start_time, end_time
    );

    let result = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO bookings (id, room_id, user_id, start_time, end_time, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING id, room_id, user_id, start_time, end_time, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(room_id)
    .bind(user_id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(reservation) => Ok(Some(reservation)),
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) =>
        {
            tracing::debug!("Reservation overlaps an existing one: room={}", room_id);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_reservations_by_room_id(
    pool: &Pool<Postgres>,
    room_id: Uuid,
) -> Result<Vec<DbReservation>> {
    let reservations = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, room_id, user_id, start_time, end_time, created_at, updated_at
        FROM bookings
        WHERE room_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}

pub async fn get_reservations_by_user_id(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<DbReservationWithRoom>> {
    let reservations = sqlx::query_as::<_, DbReservationWithRoom>(
        r#"
        SELECT b.id, b.room_id, b.user_id, b.start_time, b.end_time,
               b.created_at, b.updated_at, r.name AS room_name
        FROM bookings b
        LEFT JOIN rooms r ON r.id = b.room_id
        WHERE b.user_id = $1
        ORDER BY b.start_time ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}

pub async fn get_reservation_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbReservation>> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, room_id, user_id, start_time, end_time, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(reservation)
}

pub async fn delete_reservation(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
