use std::sync::Arc;

use chrono::Utc;
use sqlx::Error;

use crate::configs::Storage;
use crate::models::Threshold;

#[derive(Clone)]
pub struct ThresholdRepository {
    storage: Arc<Storage>,
}

impl ThresholdRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        threshold_id: &str,
        room_id: &str,
        threshold_type: &str,
        threshold_name: &str,
        low_threshold: f64,
        high_threshold: f64,
    ) -> Result<Threshold, Error> {
        let now = Utc::now();

        let threshold: Threshold = sqlx::query_as(
            r#"
            INSERT INTO thresholds (threshold_id, room_id, threshold_type, threshold_name, low_threshold, high_threshold, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                RETURNING *;
            "#,
        )
        .bind(threshold_id)
        .bind(room_id)
        .bind(threshold_type)
        .bind(threshold_name)
        .bind(low_threshold)
        .bind(high_threshold)
        .bind(now)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(threshold)
    }

    pub async fn find_by_id(&self, threshold_id: &str) -> Result<Option<Threshold>, Error> {
        let threshold: Option<Threshold> =
            sqlx::query_as("SELECT * FROM thresholds WHERE threshold_id = $1")
                .bind(threshold_id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(threshold)
    }

    pub async fn find_by_room_id(&self, room_id: &str) -> Result<Vec<Threshold>, Error> {
        let thresholds: Vec<Threshold> =
            sqlx::query_as("SELECT * FROM thresholds WHERE room_id = $1")
                .bind(room_id)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(thresholds)
    }

    pub async fn update(
        &self,
        threshold_id: &str,
        threshold_type: Option<&str>,
        threshold_name: Option<&str>,
        low_threshold: Option<f64>,
        high_threshold: Option<f64>,
    ) -> Result<Option<Threshold>, Error> {
        let threshold: Option<Threshold> = sqlx::query_as(
            r#"
            UPDATE thresholds
                SET threshold_type = COALESCE($1, threshold_type),
                    threshold_name = COALESCE($2, threshold_name),
                    low_threshold = COALESCE($3, low_threshold),
                    high_threshold = COALESCE($4, high_threshold),
                    updated_at = $5
                WHERE threshold_id = $6
                RETURNING *;
            "#,
        )
        .bind(threshold_type)
        .bind(threshold_name)
        .bind(low_threshold)
        .bind(high_threshold)
        .bind(Utc::now())
        .bind(threshold_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(threshold)
    }

    pub async fn delete(&self, threshold_id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM thresholds WHERE threshold_id = $1")
            .bind(threshold_id)
            .execute(self.storage.get_pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
