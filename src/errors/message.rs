use axum::http::StatusCode;

/// Per-message routing failures. Every variant is recoverable: the consuming
/// loop logs the error, discards the message and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Unhandled topic: {0}")]
    UnhandledTopic(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl MessageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MessageError::Payload(_) => StatusCode::BAD_REQUEST,
            MessageError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            MessageError::DeviceNotFound(_) => StatusCode::NOT_FOUND,
            MessageError::UnhandledTopic(_) => StatusCode::BAD_REQUEST,
            MessageError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
