mod api;
mod broker;
mod message;
mod scene;

pub use api::ApiError;
pub use broker::BrokerError;
pub use message::MessageError;
pub use scene::SceneError;
