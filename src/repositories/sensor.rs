use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::Error;

use crate::configs::Storage;
use crate::models::Sensor;

#[derive(Clone)]
pub struct SensorRepository {
    storage: Arc<Storage>,
}

impl SensorRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        room_id: &str,
        sensor_type: &str,
        sensor_value: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Sensor, Error> {
        let sensor: Sensor = sqlx::query_as(
            r#"
            INSERT INTO sensors (room_id, sensor_type, sensor_value, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING *;
            "#,
        )
        .bind(room_id)
        .bind(sensor_type)
        .bind(sensor_value)
        .bind(created_at)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(sensor)
    }

    /// Latest 100 readings for a room, newest first, optionally narrowed to
    /// one sensor type.
    pub async fn find_latest_by_room(
        &self,
        room_id: &str,
        sensor_type: Option<&str>,
    ) -> Result<Vec<Sensor>, Error> {
        let sensors: Vec<Sensor> = match sensor_type {
            Some(sensor_type) => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM sensors
                        WHERE room_id = $1 AND sensor_type = $2
                        ORDER BY created_at DESC, sensor_id DESC
                        LIMIT 100;
                    "#,
                )
                .bind(room_id)
                .bind(sensor_type)
                .fetch_all(self.storage.get_pool())
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM sensors
                        WHERE room_id = $1
                        ORDER BY created_at DESC, sensor_id DESC
                        LIMIT 100;
                    "#,
                )
                .bind(room_id)
                .fetch_all(self.storage.get_pool())
                .await?
            }
        };

        Ok(sensors)
    }
}
