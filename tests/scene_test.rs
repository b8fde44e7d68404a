use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use homesync::mocks::MockGateway;
use homesync::services::SceneMode;

mod common;
use common::mock_app::MockApp;

#[tokio::test]
async fn test_away_turns_everything_off() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;
    app.create_test_device("light-001", "room-1", "on").await;
    app.create_test_device("light-002", "room-1", "on").await;
    app.create_test_device("adc-001", "room-1", "on").await;

    app.scenes.run(SceneMode::Away).await.unwrap();

    let sent = app.gateway.sent();

    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|(_, status)| status == "off"));

    let targeted: Vec<&str> = sent.iter().map(|(id, _)| id.as_str()).collect();
    assert!(targeted.contains(&"light-001"));
    assert!(targeted.contains(&"light-002"));
    assert!(targeted.contains(&"adc-001"));
}

#[tokio::test]
async fn test_home_runs_in_order() {
    let app = MockApp::new().await;

    app.scenes.run(SceneMode::Home).await.unwrap();

    assert_eq!(
        app.gateway.sent(),
        vec![
            (String::from("light-001"), String::from("on")),
            (String::from("adc-001"), String::from("on")),
        ]
    );
}

#[tokio::test]
async fn test_failed_device_does_not_stop_the_scene() {
    let gateway = Arc::new(MockGateway::failing_for(&["light-001"]));
    let app = MockApp::with_gateway(gateway).await;

    app.scenes.run(SceneMode::Home).await.unwrap();

    // The first command failed, the second still went out.
    assert_eq!(
        app.gateway.sent(),
        vec![(String::from("adc-001"), String::from("on"))]
    );
}

#[tokio::test]
async fn test_sleep_normalizes_through_local_gateway() {
    let app = MockApp::new().await;
    app.create_test_room("room-1").await;
    app.create_test_device("light-001", "room-1", "on").await;
    app.create_test_device("light-002", "room-1", "off").await;
    app.create_test_device("adc-001", "room-1", "on").await;

    // Run against the in-process gateway so commands hit the store.
    let gateway = Arc::new(homesync::services::LocalCommandGateway::new(
        app.control.clone(),
    ));
    let scenes = homesync::services::SceneService::new(app.storage.clone(), gateway);

    scenes.run(SceneMode::Sleep).await.unwrap();

    assert_eq!(app.device_status("light-001").await, "off");
    assert_eq!(app.device_status("light-002").await, "on");
    // "sleep" is not "on", so it lands as "off".
    assert_eq!(app.device_status("adc-001").await, "off");

    // Every applied command produced a change record.
    let broadcasts: Vec<_> = app
        .broker
        .published()
        .into_iter()
        .filter(|(topic, _)| topic == "devices")
        .collect();
    assert_eq!(broadcasts.len(), 3);
}

#[tokio::test]
async fn test_activate_scene_endpoint() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/scenes/home")
        .method(Method::POST)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_activate_unknown_scene() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/scenes/party")
        .method(Method::POST)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scene_plan_endpoint() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/scenes/sleep")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let plan: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan[0]["deviceId"], "light-001");
    assert_eq!(plan[0]["status"], "off");
}
