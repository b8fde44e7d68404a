use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::configs::Storage;
use crate::errors::MessageError;
use crate::repositories::{DeviceRepository, RoomRepository, SensorRepository};

pub const TOPIC_SENSOR_DATA: &str = "sensor/data";
pub const TOPIC_DEVICE_STATUS: &str = "device/status";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SensorDataMessage {
    room_id: String,
    sensor_type: String,
    sensor_value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceStatusMessage {
    device_id: String,
    device_status: String,
}

/// Decodes inbound broker messages and applies the matching store mutation.
///
/// Failures are strictly per-message. Messages can arrive concurrently and
/// out of order; nothing here assumes per-topic ordering.
pub struct MessageRouter {
    rooms: RoomRepository,
    sensors: SensorRepository,
    devices: DeviceRepository,
}

impl MessageRouter {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            rooms: RoomRepository::new(storage.clone()),
            sensors: SensorRepository::new(storage.clone()),
            devices: DeviceRepository::new(storage),
        }
    }

    pub async fn route(&self, topic: &str, payload: &[u8]) -> Result<(), MessageError> {
        match topic {
            TOPIC_SENSOR_DATA => self.store_sensor_data(payload).await,
            TOPIC_DEVICE_STATUS => self.store_device_status(payload).await,
            other => Err(MessageError::UnhandledTopic(other.to_string())),
        }
    }

    async fn store_sensor_data(&self, payload: &[u8]) -> Result<(), MessageError> {
        let message: SensorDataMessage = serde_json::from_slice(payload)?;

        if !self.rooms.exists_by_id(&message.room_id).await? {
            return Err(MessageError::RoomNotFound(message.room_id));
        }

        let sensor = self
            .sensors
            .create(
                &message.room_id,
                &message.sensor_type,
                message.sensor_value,
                Utc::now(),
            )
            .await?;

        tracing::debug!(
            "stored reading {} ({} = {}) for room {}",
            sensor.sensor_id,
            sensor.sensor_type,
            sensor.sensor_value,
            sensor.room_id
        );

        Ok(())
    }

    async fn store_device_status(&self, payload: &[u8]) -> Result<(), MessageError> {
        let message: DeviceStatusMessage = serde_json::from_slice(payload)?;

        // Telemetry may reference devices this instance never saw; report
        // them as not found so the caller discards instead of crashing.
        match self
            .devices
            .update_status(&message.device_id, &message.device_status)
            .await?
        {
            Some(device) => {
                tracing::debug!(
                    "device {} reported status {}",
                    device.device_id,
                    device.device_status
                );
                Ok(())
            }
            None => Err(MessageError::DeviceNotFound(message.device_id)),
        }
    }
}
