use std::sync::Arc;

use chrono::Utc;
use sqlx::Error;

use crate::configs::Storage;
use crate::models::Device;

#[derive(Clone)]
pub struct DeviceRepository {
    storage: Arc<Storage>,
}

impl DeviceRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        device_id: &str,
        room_id: &str,
        device_type: &str,
        device_name: &str,
    ) -> Result<Device, Error> {
        let now = Utc::now();

        // New devices always start powered off.
        let device: Device = sqlx::query_as(
            r#"
            INSERT INTO devices (device_id, room_id, device_type, device_name, device_status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, 'off', $5, $5)
                RETURNING *;
            "#,
        )
        .bind(device_id)
        .bind(room_id)
        .bind(device_type)
        .bind(device_name)
        .bind(now)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(device)
    }

    pub async fn find_by_id(&self, device_id: &str) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as("SELECT * FROM devices WHERE device_id = $1")
            .bind(device_id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(device)
    }

    pub async fn find_all(&self) -> Result<Vec<Device>, Error> {
        let devices: Vec<Device> = sqlx::query_as("SELECT * FROM devices")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(devices)
    }

    pub async fn find_by_room_id(&self, room_id: &str) -> Result<Vec<Device>, Error> {
        let devices: Vec<Device> = sqlx::query_as("SELECT * FROM devices WHERE room_id = $1")
            .bind(room_id)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(devices)
    }

    pub async fn exists_by_id(&self, device_id: &str) -> Result<bool, Error> {
        let exists: (i64,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM devices WHERE device_id = $1)")
                .bind(device_id)
                .fetch_one(self.storage.get_pool())
                .await?;

        Ok(exists.0 != 0)
    }

    pub async fn update_info(
        &self,
        device_id: &str,
        device_type: Option<&str>,
        device_name: Option<&str>,
    ) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as(
            r#"
            UPDATE devices
                SET device_type = COALESCE($1, device_type),
                    device_name = COALESCE($2, device_name),
                    updated_at = $3
                WHERE device_id = $4
                RETURNING *;
            "#,
        )
        .bind(device_type)
        .bind(device_name)
        .bind(Utc::now())
        .bind(device_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(device)
    }

    /// Single-row status write; returns `None` when the device is unknown.
    /// Concurrent writers race last-writer-wins, which is acceptable here.
    pub async fn update_status(
        &self,
        device_id: &str,
        device_status: &str,
    ) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as(
            r#"
            UPDATE devices
                SET device_status = $1, updated_at = $2
                WHERE device_id = $3
                RETURNING *;
            "#,
        )
        .bind(device_status)
        .bind(Utc::now())
        .bind(device_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(device)
    }

    pub async fn delete(&self, device_id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM devices WHERE device_id = $1")
            .bind(device_id)
            .execute(self.storage.get_pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
