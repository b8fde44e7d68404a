use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::BrokerError;
use crate::services::{CommandGateway, MqttBroker, TopicRegistry};

/// In-process stand-in for the MQTT connection. Keeps the same registry
/// semantics as the real client and records every publish for assertions.
#[derive(Default)]
pub struct MockBroker {
    registry: TopicRegistry,
    published: Mutex<Vec<(String, String)>>,
}

impl MockBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, as `(topic, payload)` pairs.
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl MqttBroker for MockBroker {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), BrokerError> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload.to_string()));

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<bool, BrokerError> {
        Ok(self.registry.add(topic))
    }

    async fn unsubscribe(&self, topic: &str) -> Result<bool, BrokerError> {
        Ok(self.registry.remove(topic))
    }

    fn subscriptions(&self) -> Vec<String> {
        self.registry.list()
    }
}

/// Recording gateway. Accepts every command unless the device id was marked
/// as failing, which mimics a stale plan entry or an unreachable device.
#[derive(Default)]
pub struct MockGateway {
    failing: Vec<String>,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(device_ids: &[&str]) -> Self {
        Self {
            failing: device_ids.iter().map(|id| id.to_string()).collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Commands delivered so far, as `(device_id, status)` pairs, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandGateway for MockGateway {
    async fn send(&self, device_id: &str, status: &str) -> anyhow::Result<String> {
        if self.failing.iter().any(|id| id == device_id) {
            anyhow::bail!("device not found: {}", device_id);
        }

        self.sent
            .lock()
            .unwrap()
            .push((device_id.to_string(), status.to_string()));

        Ok(status.to_string())
    }
}
