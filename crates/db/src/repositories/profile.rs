use crate::models::DbProfile;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_profile_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfile>> {
    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, username, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn upsert_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    username: Option<&str>,
) -> Result<DbProfile> {
    let now = Utc::now();

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO profiles (id, username, created_at, updated_at)
        VALUES ($1, $2, $3, $3)
        ON CONFLICT (id) DO UPDATE
        SET username = EXCLUDED.username, updated_at = EXCLUDED.updated_at
        RETURNING id, username, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}
