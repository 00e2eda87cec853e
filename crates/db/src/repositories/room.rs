use crate::models::DbRoom;
use chrono::Utc;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const ROOM_COLUMNS: &str =
    "id, name, description, capacity, equipment, owner_id, created_at, updated_at";

pub async fn create_room(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    name: &str,
    description: Option<&str>,
    capacity: i32,
    equipment: &[String],
) -> Result<DbRoom> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating room: id={}, name={}, owner={}", id, name, owner_id);

    let room = sqlx::query_as::<_, DbRoom>(&format!(
        r#"
        INSERT INTO rooms (id, name, description, capacity, equipment, owner_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING {ROOM_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(capacity)
    .bind(equipment)
    .bind(owner_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(room)
}

pub async fn get_rooms(pool: &Pool<Postgres>) -> Result<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(&format!(
        "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY created_at ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

pub async fn get_rooms_by_owner_id(pool: &Pool<Postgres>, owner_id: Uuid) -> Result<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(&format!(
        "SELECT {ROOM_COLUMNS} FROM rooms WHERE owner_id = $1 ORDER BY created_at ASC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

pub async fn get_room_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbRoom>> {
    tracing::debug!("Getting room by id: {}", id);

    let room = sqlx::query_as::<_, DbRoom>(&format!(
        "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}

/// Merges the given fields into the stored room. `description` is
/// `Some(None)` to clear it.
pub async fn update_room(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    description: Option<Option<&str>>,
    capacity: Option<i32>,
    equipment: Option<&[String]>,
) -> Result<DbRoom> {
    let room = get_room_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Room not found"))?;

    let name = name.unwrap_or(&room.name);
    let description = description.unwrap_or(room.description.as_deref());
    let capacity = capacity.unwrap_or(room.capacity);
    let equipment = equipment.unwrap_or(&room.equipment);

    let updated_room = sqlx::query_as::<_, DbRoom>(&format!(
        r#"
        UPDATE rooms
        SET name = $2, description = $3, capacity = $4, equipment = $5, updated_at = $6
        WHERE id = $1
        RETURNING {ROOM_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(capacity)
    .bind(equipment)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated_room)
}

/// Removes the room; its bookings go with it through `ON DELETE CASCADE`.
pub async fn delete_room(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM rooms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
