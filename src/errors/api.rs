use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::{BrokerError, MessageError, SceneError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Broker(e) => e.status_code(),
            ApiError::Message(e) => e.status_code(),
            ApiError::Scene(e) => e.status_code(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}
