use std::sync::Arc;

use axum::Router;

use homesync::app::build_router;
use homesync::configs::schema::SchemaManager;
use homesync::configs::settings::Database;
use homesync::configs::storage::Storage;
use homesync::mocks::{MockBroker, MockGateway};
use homesync::models::{Device, Preference, Room, Threshold};
use homesync::services::{DeviceService, MessageRouter, SceneService};

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub broker: Arc<MockBroker>,
    pub gateway: Arc<MockGateway>,
    pub control: Arc<DeviceService>,
    pub scenes: Arc<SceneService>,
    pub message_router: Arc<MessageRouter>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_gateway(Arc::new(MockGateway::new())).await
    }

    pub async fn with_gateway(gateway: Arc<MockGateway>) -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let broker = Arc::new(MockBroker::new());
        let control = Arc::new(DeviceService::new(storage.clone(), broker.clone()));
        let scenes = Arc::new(SceneService::new(storage.clone(), gateway.clone()));
        let message_router = Arc::new(MessageRouter::new(storage.clone()));

        let router = build_router(
            storage.clone(),
            broker.clone(),
            control.clone(),
            scenes.clone(),
        );

        Self {
            storage,
            broker,
            gateway,
            control,
            scenes,
            message_router,
            router,
        }
    }

    pub async fn create_test_room(&self, room_id: &str) -> Room {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (room_id, room_type, room_name, created_at, updated_at)
                VALUES ($1, 'living', 'Test Room', datetime('now'), datetime('now'))
                RETURNING *;
            "#,
        )
        .bind(room_id)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_device(&self, device_id: &str, room_id: &str, status: &str) -> Device {
        sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (device_id, room_id, device_type, device_name, device_status, created_at, updated_at)
                VALUES ($1, $2, 'light', 'Test Device', $3, datetime('now'), datetime('now'))
                RETURNING *;
            "#,
        )
        .bind(device_id)
        .bind(room_id)
        .bind(status)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_preference(&self, preference_id: &str, room_id: &str) -> Preference {
        sqlx::query_as::<_, Preference>(
            r#"
            INSERT INTO preferences (preference_id, room_id, preference_type, preference_name, preference_value, created_at, updated_at)
                VALUES ($1, $2, 'temperature', 'Test Preference', 21.5, datetime('now'), datetime('now'))
                RETURNING *;
            "#,
        )
        .bind(preference_id)
        .bind(room_id)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_threshold(&self, threshold_id: &str, room_id: &str) -> Threshold {
        sqlx::query_as::<_, Threshold>(
            r#"
            INSERT INTO thresholds (threshold_id, room_id, threshold_type, threshold_name, low_threshold, high_threshold, created_at, updated_at)
                VALUES ($1, $2, 'temperature', 'Test Threshold', 18.0, 26.0, datetime('now'), datetime('now'))
                RETURNING *;
            "#,
        )
        .bind(threshold_id)
        .bind(room_id)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn count_sensors(&self) -> i64 {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sensors")
            .fetch_one(self.storage.get_pool())
            .await
            .unwrap();

        count.0
    }

    pub async fn device_status(&self, device_id: &str) -> String {
        let status: (String,) =
            sqlx::query_as("SELECT device_status FROM devices WHERE device_id = $1")
                .bind(device_id)
                .fetch_one(self.storage.get_pool())
                .await
                .unwrap();

        status.0
    }
}
