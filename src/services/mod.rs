pub mod broker_client;
pub mod device_service;
pub mod gateway;
pub mod message_router;
pub mod scene_service;
pub mod topic_registry;

pub use broker_client::{BrokerClient, MqttBroker};
pub use device_service::DeviceService;
pub use gateway::{CommandGateway, LocalCommandGateway};
pub use message_router::MessageRouter;
pub use scene_service::{SceneMode, SceneService};
pub use topic_registry::TopicRegistry;
