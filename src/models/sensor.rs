use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Table;

/// A single telemetry reading. Rows are append-only and never updated;
/// retention is out of scope, the table grows unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub sensor_id: i64,
    pub room_id: String,
    pub sensor_type: String,
    pub sensor_value: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SensorTable;

impl Table for SensorTable {
    fn name(&self) -> &'static str {
        "sensors"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensors (
                sensor_id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id TEXT NOT NULL,
                sensor_type TEXT NOT NULL,
                sensor_value REAL NOT NULL,
                created_at DATETIME NOT NULL,
                FOREIGN KEY (room_id) REFERENCES rooms (room_id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensors;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["rooms"]
    }
}
