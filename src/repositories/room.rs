use std::sync::Arc;

use chrono::Utc;
use sqlx::Error;

use crate::configs::Storage;
use crate::models::Room;

#[derive(Clone)]
pub struct RoomRepository {
    storage: Arc<Storage>,
}

impl RoomRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        room_id: &str,
        room_type: &str,
        room_name: &str,
    ) -> Result<Room, Error> {
        let now = Utc::now();

        let room: Room = sqlx::query_as(
            r#"
            INSERT INTO rooms (room_id, room_type, room_name, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $4)
                RETURNING *;
            "#,
        )
        .bind(room_id)
        .bind(room_type)
        .bind(room_name)
        .bind(now)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(room)
    }

    pub async fn find_by_id(&self, room_id: &str) -> Result<Option<Room>, Error> {
        let room: Option<Room> = sqlx::query_as("SELECT * FROM rooms WHERE room_id = $1")
            .bind(room_id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(room)
    }

    pub async fn find_all(&self) -> Result<Vec<Room>, Error> {
        let rooms: Vec<Room> = sqlx::query_as("SELECT * FROM rooms")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(rooms)
    }

    pub async fn exists_by_id(&self, room_id: &str) -> Result<bool, Error> {
        let exists: (i64,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM rooms WHERE room_id = $1)")
                .bind(room_id)
                .fetch_one(self.storage.get_pool())
                .await?;

        Ok(exists.0 != 0)
    }

    /// Update name and type only; ownership of children never moves.
    pub async fn update(
        &self,
        room_id: &str,
        room_type: Option<&str>,
        room_name: Option<&str>,
    ) -> Result<Option<Room>, Error> {
        let room: Option<Room> = sqlx::query_as(
            r#"
            UPDATE rooms
                SET room_type = COALESCE($1, room_type),
                    room_name = COALESCE($2, room_name),
                    updated_at = $3
                WHERE room_id = $4
                RETURNING *;
            "#,
        )
        .bind(room_type)
        .bind(room_name)
        .bind(Utc::now())
        .bind(room_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(room)
    }

    /// Deleting a room cascades to its devices, sensors, thresholds and
    /// preferences through the schema foreign keys.
    pub async fn delete(&self, room_id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(room_id)
            .execute(self.storage.get_pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
