use std::sync::Arc;

use async_trait::async_trait;

use crate::services::DeviceService;

/// Delivery seam for device commands. Bulk control flows (scenes) go through
/// this instead of touching the store directly, so the transport can be
/// swapped without rewriting the sequences.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    /// Apply `status` to the device and return the outcome actually applied.
    /// Fails when the device is unknown or unreachable.
    async fn send(&self, device_id: &str, status: &str) -> anyhow::Result<String>;
}

/// Gateway backed by the in-process control path: persist the status change
/// and let the usual broadcast notify downstream actuators.
pub struct LocalCommandGateway {
    devices: Arc<DeviceService>,
}

impl LocalCommandGateway {
    pub fn new(devices: Arc<DeviceService>) -> Self {
        Self { devices }
    }
}

#[async_trait]
impl CommandGateway for LocalCommandGateway {
    async fn send(&self, device_id: &str, status: &str) -> anyhow::Result<String> {
        Ok(self.devices.set_status(device_id, status).await?)
    }
}
