use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

/// SQLSTATE raised when a row violates an `EXCLUDE` constraint.
pub const EXCLUSION_VIOLATION: &str = "23P01";

/// Name of the constraint that keeps reservations of one room from overlapping.
pub const NO_OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for `room_id WITH =` inside a GiST exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id UUID PRIMARY KEY,
            username VARCHAR(50) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create rooms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            capacity INTEGER NOT NULL,
            equipment TEXT[] NOT NULL DEFAULT '{}',
            owner_id UUID NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_capacity CHECK (capacity >= 1)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            room_id UUID NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            user_id UUID NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT bookings_no_overlap EXCLUDE USING gist (
                room_id WITH =,
                tstzrange(start_time, end_time, '[)') WITH &&
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements, so run unprepared
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_rooms_owner_id ON rooms(owner_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_room_id ON bookings(room_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_start_time ON bookings(start_time);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
