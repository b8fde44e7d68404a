use chrono::{DateTime, Utc};

use homesync::errors::MessageError;

mod common;
use common::mock_app::MockApp;

#[tokio::test]
async fn test_sensor_data_round_trip() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;

    let before = Utc::now();

    app.message_router
        .route(
            "sensor/data",
            br#"{"roomId": "room-1", "sensorType": "temperature", "sensorValue": 22.5}"#,
        )
        .await
        .unwrap();

    let (room_id, sensor_type, sensor_value, created_at): (String, String, f64, DateTime<Utc>) =
        sqlx::query_as("SELECT room_id, sensor_type, sensor_value, created_at FROM sensors")
            .fetch_one(app.storage.get_pool())
            .await
            .unwrap();

    assert_eq!(room_id, "room-1");
    assert_eq!(sensor_type, "temperature");
    assert_eq!(sensor_value, 22.5);
    assert!(created_at >= before);
}

#[tokio::test]
async fn test_sensor_data_unknown_room_is_discarded() {
    let app = MockApp::new().await;

    let result = app
        .message_router
        .route(
            "sensor/data",
            br#"{"roomId": "ghost", "sensorType": "temperature", "sensorValue": 22.5}"#,
        )
        .await;

    assert!(matches!(result, Err(MessageError::RoomNotFound(_))));
    assert_eq!(app.count_sensors().await, 0);
}

#[tokio::test]
async fn test_sensor_data_malformed_payload() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;

    // Value is a string, not a number.
    let result = app
        .message_router
        .route(
            "sensor/data",
            br#"{"roomId": "room-1", "sensorType": "temperature", "sensorValue": "warm"}"#,
        )
        .await;

    assert!(matches!(result, Err(MessageError::Payload(_))));
    assert_eq!(app.count_sensors().await, 0);
}

#[tokio::test]
async fn test_sensor_data_missing_field() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;

    let result = app
        .message_router
        .route("sensor/data", br#"{"roomId": "room-1"}"#)
        .await;

    assert!(matches!(result, Err(MessageError::Payload(_))));
}

#[tokio::test]
async fn test_device_status_is_applied() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;
    app.create_test_device("light-001", "room-1", "off").await;

    app.message_router
        .route(
            "device/status",
            br#"{"deviceId": "light-001", "deviceStatus": "on"}"#,
        )
        .await
        .unwrap();

    assert_eq!(app.device_status("light-001").await, "on");
}

#[tokio::test]
async fn test_device_status_malformed_payload() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;
    app.create_test_device("light-001", "room-1", "off").await;

    // Id is a number, not a string.
    let result = app
        .message_router
        .route(
            "device/status",
            br#"{"deviceId": 42, "deviceStatus": "on"}"#,
        )
        .await;

    assert!(matches!(result, Err(MessageError::Payload(_))));
    assert_eq!(app.device_status("light-001").await, "off");
}

#[tokio::test]
async fn test_device_status_unknown_device_is_discarded() {
    let app = MockApp::new().await;

    let result = app
        .message_router
        .route(
            "device/status",
            br#"{"deviceId": "ghost", "deviceStatus": "on"}"#,
        )
        .await;

    assert!(matches!(result, Err(MessageError::DeviceNotFound(_))));
}

#[tokio::test]
async fn test_unhandled_topic() {
    let app = MockApp::new().await;

    let result = app.message_router.route("weather/forecast", b"{}").await;

    assert!(matches!(result, Err(MessageError::UnhandledTopic(_))));
}
