use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub preference_id: String,
    pub room_id: String,
    pub preference_type: String,
    pub preference_name: String,
    pub preference_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PreferenceTable;

impl Table for PreferenceTable {
    fn name(&self) -> &'static str {
        "preferences"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                preference_id TEXT PRIMARY KEY,
                room_id TEXT NOT NULL,
                preference_type TEXT NOT NULL,
                preference_name TEXT NOT NULL,
                preference_value REAL NOT NULL,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL,
                FOREIGN KEY (room_id) REFERENCES rooms (room_id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS preferences;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["rooms"]
    }
}
