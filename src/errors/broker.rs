use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("Transport error: {0}")]
    Transport(#[from] rumqttc::ClientError),

    #[error("Connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("Broker did not acknowledge the connection in time")]
    ConnectTimeout,
}

impl BrokerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::Transport(_) => StatusCode::BAD_GATEWAY,
            BrokerError::Connection(_) => StatusCode::BAD_GATEWAY,
            BrokerError::ConnectTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}
