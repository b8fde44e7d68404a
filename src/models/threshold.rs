use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub threshold_id: String,
    pub room_id: String,
    pub threshold_type: String,
    pub threshold_name: String,
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ThresholdTable;

impl Table for ThresholdTable {
    fn name(&self) -> &'static str {
        "thresholds"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS thresholds (
                threshold_id TEXT PRIMARY KEY,
                room_id TEXT NOT NULL,
                threshold_type TEXT NOT NULL,
                threshold_name TEXT NOT NULL,
                low_threshold REAL NOT NULL,
                high_threshold REAL NOT NULL,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL,
                FOREIGN KEY (room_id) REFERENCES rooms (room_id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS thresholds;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["rooms"]
    }
}
