use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::configs::Storage;
use crate::errors::SceneError;
use crate::repositories::DeviceRepository;
use crate::services::CommandGateway;

/// Upper bound per gateway call so one hung device cannot stall the rest of
/// a sequence forever.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    Home,
    Away,
    Sleep,
}

impl SceneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneMode::Home => "home",
            SceneMode::Away => "away",
            SceneMode::Sleep => "sleep",
        }
    }
}

impl fmt::Display for SceneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneMode {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(SceneMode::Home),
            "away" => Ok(SceneMode::Away),
            "sleep" => Ok(SceneMode::Sleep),
            other => Err(SceneError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCommand {
    pub device_id: String,
    pub status: String,
}

impl SceneCommand {
    fn new(device_id: &str, status: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            status: status.to_string(),
        }
    }
}

/// The fixed plans. `away` has no fixed plan: its intent is "everything
/// off", so it expands against the live device set instead.
fn fixed_plan(mode: SceneMode) -> Option<Vec<SceneCommand>> {
    match mode {
        SceneMode::Home => Some(vec![
            SceneCommand::new("light-001", "on"),
            SceneCommand::new("adc-001", "on"),
        ]),
        // The climate unit gets "sleep", which the gateway normalizes like
        // any other non-"on" status.
        SceneMode::Sleep => Some(vec![
            SceneCommand::new("light-001", "off"),
            SceneCommand::new("light-002", "on"),
            SceneCommand::new("adc-001", "sleep"),
        ]),
        SceneMode::Away => None,
    }
}

/// Executes named device-command sequences, strictly in order.
///
/// Commands are fire-and-forget: a stale device id, a gateway failure or a
/// timeout logs a warning and the rest of the sequence still runs. There is
/// no rollback.
pub struct SceneService {
    devices: DeviceRepository,
    gateway: Arc<dyn CommandGateway>,
}

impl SceneService {
    pub fn new(storage: Arc<Storage>, gateway: Arc<dyn CommandGateway>) -> Self {
        Self {
            devices: DeviceRepository::new(storage),
            gateway,
        }
    }

    /// Resolve the ordered command sequence for a mode.
    pub async fn plan(&self, mode: SceneMode) -> Result<Vec<SceneCommand>, SceneError> {
        if let Some(commands) = fixed_plan(mode) {
            return Ok(commands);
        }

        let commands = self
            .devices
            .find_all()
            .await?
            .into_iter()
            .map(|device| SceneCommand::new(&device.device_id, "off"))
            .collect();

        Ok(commands)
    }

    pub async fn run(&self, mode: SceneMode) -> Result<(), SceneError> {
        let commands = self.plan(mode).await?;

        tracing::info!("scene {} started, {} commands", mode, commands.len());

        for command in &commands {
            let send = self.gateway.send(&command.device_id, &command.status);

            match timeout(COMMAND_TIMEOUT, send).await {
                Ok(Ok(outcome)) => {
                    tracing::debug!("device {} -> {}", command.device_id, outcome);
                }
                Ok(Err(e)) => {
                    tracing::warn!("skipping device {}: {}", command.device_id, e);
                }
                Err(_) => {
                    tracing::warn!(
                        "device {} did not answer within {:?}, moving on",
                        command.device_id,
                        COMMAND_TIMEOUT
                    );
                }
            }
        }

        tracing::info!("scene {} finished", mode);

        Ok(())
    }
}
