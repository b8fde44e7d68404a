use std::sync::Arc;

use serde_json::json;

use crate::configs::Storage;
use crate::errors::{ApiError, MessageError};
use crate::models::Device;
use crate::repositories::DeviceRepository;
use crate::services::MqttBroker;

/// Outbound topic carrying device status change records.
pub const TOPIC_DEVICE_CHANGES: &str = "devices";

/// Control path for device status. The mutation commits first, then a
/// minimal change record goes out on the `devices` topic so physical
/// actuators and sibling services stay in sync without polling.
pub struct DeviceService {
    devices: DeviceRepository,
    broker: Arc<dyn MqttBroker>,
}

impl DeviceService {
    pub fn new(storage: Arc<Storage>, broker: Arc<dyn MqttBroker>) -> Self {
        Self {
            devices: DeviceRepository::new(storage),
            broker,
        }
    }

    /// Set a device to an explicit status and return the status actually
    /// stored. Anything other than `on` (case-insensitive) is stored as `off`.
    pub async fn set_status(&self, device_id: &str, status: &str) -> Result<String, ApiError> {
        let device = self
            .devices
            .update_status(device_id, normalize_status(status))
            .await?
            .ok_or_else(|| MessageError::DeviceNotFound(device_id.to_string()))?;

        self.broadcast(&device).await;

        Ok(device.device_status)
    }

    /// Flip a device between `on` and `off`, returning the new status.
    pub async fn toggle(&self, device_id: &str) -> Result<String, ApiError> {
        let current = self
            .devices
            .find_by_id(device_id)
            .await?
            .ok_or_else(|| MessageError::DeviceNotFound(device_id.to_string()))?;

        let next = if current.device_status.eq_ignore_ascii_case("on") {
            "off"
        } else {
            "on"
        };

        self.set_status(device_id, next).await
    }

    async fn broadcast(&self, device: &Device) {
        let record = json!({
            "deviceId": device.device_id,
            "deviceStatus": device.device_status,
        });

        // The write is already committed; a lost notification only delays an
        // observer until the next change.
        if let Err(e) = self
            .broker
            .publish(TOPIC_DEVICE_CHANGES, &record.to_string())
            .await
        {
            tracing::warn!("failed to broadcast status of {}: {}", device.device_id, e);
        }
    }
}

fn normalize_status(status: &str) -> &'static str {
    if status.eq_ignore_ascii_case("on") {
        "on"
    } else {
        "off"
    }
}
