use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use tower::ServiceExt;

mod common;
use common::mock_app::MockApp;

async fn insert_reading(app: &MockApp, room_id: &str, sensor_type: &str, value: f64, age_secs: i64) {
    sqlx::query(
        r#"
        INSERT INTO sensors (room_id, sensor_type, sensor_value, created_at)
            VALUES ($1, $2, $3, $4);
        "#,
    )
    .bind(room_id)
    .bind(sensor_type)
    .bind(value)
    .bind(Utc::now() - Duration::seconds(age_secs))
    .execute(app.storage.get_pool())
    .await
    .unwrap();
}

#[tokio::test]
async fn test_readings_newest_first() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;

    insert_reading(&app, "room-1", "temperature", 20.0, 30).await;
    insert_reading(&app, "room-1", "temperature", 21.0, 20).await;
    insert_reading(&app, "room-1", "temperature", 22.0, 10).await;

    let request = Request::builder()
        .uri("/api/sensors/room/room-1")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let readings: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    let values: Vec<f64> = readings
        .iter()
        .map(|r| r["sensorValue"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![22.0, 21.0, 20.0]);
}

#[tokio::test]
async fn test_readings_filtered_by_type() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;

    insert_reading(&app, "room-1", "temperature", 21.0, 20).await;
    insert_reading(&app, "room-1", "humidity", 45.0, 10).await;

    let request = Request::builder()
        .uri("/api/sensors/room/room-1?sensorType=humidity")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let readings: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0]["sensorType"], "humidity");
}

#[tokio::test]
async fn test_readings_capped_at_100() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;

    for i in 0..110 {
        insert_reading(&app, "room-1", "temperature", f64::from(i), i64::from(200 - i)).await;
    }

    let request = Request::builder()
        .uri("/api/sensors/room/room-1")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let readings: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(readings.len(), 100);
    // The newest reading carries the highest value.
    assert_eq!(readings[0]["sensorValue"].as_f64().unwrap(), 109.0);
}

#[tokio::test]
async fn test_readings_unknown_room() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/sensors/room/ghost")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
