use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Unknown scene mode: {0}")]
    UnknownMode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SceneError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SceneError::UnknownMode(_) => StatusCode::BAD_REQUEST,
            SceneError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
