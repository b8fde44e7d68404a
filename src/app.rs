use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{
    DeviceRepository, PreferenceRepository, RoomRepository, SensorRepository, ThresholdRepository,
};
use crate::services::{
    BrokerClient, DeviceService, LocalCommandGateway, MessageRouter, MqttBroker, SceneService,
    TopicRegistry,
};

pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default()).await?,
    );

    let registry = Arc::new(TopicRegistry::new());
    let router = Arc::new(MessageRouter::new(storage.clone()));

    let broker: Arc<dyn MqttBroker> = Arc::new(
        BrokerClient::connect(&settings.broker, registry.clone(), router.clone()).await?,
    );

    let control = Arc::new(DeviceService::new(storage.clone(), broker.clone()));
    let gateway = Arc::new(LocalCommandGateway::new(control.clone()));
    let scenes = Arc::new(SceneService::new(storage.clone(), gateway));

    Ok(build_router(storage, broker, control, scenes))
}

/// Assemble the HTTP surface over an already wired service graph. Tests call
/// this directly with mock broker and gateway implementations.
pub fn build_router(
    storage: Arc<Storage>,
    broker: Arc<dyn MqttBroker>,
    control: Arc<DeviceService>,
    scenes: Arc<SceneService>,
) -> Router {
    let mqtt = Router::new()
        .route("/publish", post(publish_message))
        .route("/subscribe", post(subscribe_topic))
        .route("/unsubscribe", post(unsubscribe_topic))
        .route("/subscriptions", get(get_subscriptions))
        .with_state(MqttState {
            broker: broker.clone(),
        });

    let rooms = Router::new()
        .route("/", get(get_rooms).post(create_room))
        .route(
            "/:room_id",
            get(get_room).put(update_room).delete(delete_room),
        )
        .with_state(RoomState {
            rooms: RoomRepository::new(storage.clone()),
        });

    let devices = Router::new()
        .route("/", get(get_devices).post(create_device))
        .route(
            "/:device_id",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/:device_id/toggle", post(toggle_device))
        .route("/controller/:device_id/:status", post(control_device))
        .route("/room/:room_id", get(get_devices_by_room))
        .with_state(DeviceState {
            devices: DeviceRepository::new(storage.clone()),
            rooms: RoomRepository::new(storage.clone()),
            control,
        });

    let sensors = Router::new()
        .route("/room/:room_id", get(get_sensors_by_room))
        .with_state(SensorState {
            sensors: SensorRepository::new(storage.clone()),
            rooms: RoomRepository::new(storage.clone()),
        });

    let preferences = Router::new()
        .route("/", post(create_preference))
        .route(
            "/:preference_id",
            get(get_preference)
                .put(update_preference)
                .delete(delete_preference),
        )
        .route("/room/:room_id", get(get_preferences_by_room))
        .with_state(PreferenceState {
            preferences: PreferenceRepository::new(storage.clone()),
            rooms: RoomRepository::new(storage.clone()),
            broker: broker.clone(),
        });

    let thresholds = Router::new()
        .route("/", post(create_threshold))
        .route(
            "/:threshold_id",
            get(get_threshold)
                .put(update_threshold)
                .delete(delete_threshold),
        )
        .route("/room/:room_id", get(get_thresholds_by_room))
        .with_state(ThresholdState {
            thresholds: ThresholdRepository::new(storage.clone()),
            rooms: RoomRepository::new(storage),
            broker,
        });

    let scene_routes = Router::new()
        .route("/:mode", get(get_scene_plan).post(activate_scene))
        .with_state(SceneState { scenes });

    Router::new()
        .nest("/api/mqtt", mqtt)
        .nest("/api/rooms", rooms)
        .nest("/api/devices", devices)
        .nest("/api/sensors", sensors)
        .nest("/api/preferences", preferences)
        .nest("/api/thresholds", thresholds)
        .nest("/api/scenes", scene_routes)
        .layer(CorsLayer::permissive())
}
