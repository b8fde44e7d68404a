use std::sync::Arc;

use chrono::Utc;
use sqlx::Error;

use crate::configs::Storage;
use crate::models::Preference;

#[derive(Clone)]
pub struct PreferenceRepository {
    storage: Arc<Storage>,
}

impl PreferenceRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        preference_id: &str,
        room_id: &str,
        preference_type: &str,
        preference_name: &str,
        preference_value: f64,
    ) -> Result<Preference, Error> {
        let now = Utc::now();

        let preference: Preference = sqlx::query_as(
            r#"
            INSERT INTO preferences (preference_id, room_id, preference_type, preference_name, preference_value, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                RETURNING *;
            "#,
        )
        .bind(preference_id)
        .bind(room_id)
        .bind(preference_type)
        .bind(preference_name)
        .bind(preference_value)
        .bind(now)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(preference)
    }

    pub async fn find_by_id(&self, preference_id: &str) -> Result<Option<Preference>, Error> {
        let preference: Option<Preference> =
            sqlx::query_as("SELECT * FROM preferences WHERE preference_id = $1")
                .bind(preference_id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(preference)
    }

    pub async fn find_by_room_id(&self, room_id: &str) -> Result<Vec<Preference>, Error> {
        let preferences: Vec<Preference> =
            sqlx::query_as("SELECT * FROM preferences WHERE room_id = $1")
                .bind(room_id)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(preferences)
    }

    pub async fn update(
        &self,
        preference_id: &str,
        preference_type: Option<&str>,
        preference_name: Option<&str>,
        preference_value: Option<f64>,
    ) -> Result<Option<Preference>, Error> {
        let preference: Option<Preference> = sqlx::query_as(
            r#"
            UPDATE preferences
                SET preference_type = COALESCE($1, preference_type),
                    preference_name = COALESCE($2, preference_name),
                    preference_value = COALESCE($3, preference_value),
                    updated_at = $4
                WHERE preference_id = $5
                RETURNING *;
            "#,
        )
        .bind(preference_type)
        .bind(preference_name)
        .bind(preference_value)
        .bind(Utc::now())
        .bind(preference_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(preference)
    }

    pub async fn delete(&self, preference_id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM preferences WHERE preference_id = $1")
            .bind(preference_id)
            .execute(self.storage.get_pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
