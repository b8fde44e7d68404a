use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::errors::ApiError;
use crate::services::{SceneMode, SceneService};

#[derive(Clone)]
pub struct SceneState {
    pub scenes: Arc<SceneService>,
}

/// Preview the ordered command sequence a mode would run.
pub async fn get_scene_plan(
    Path(mode): Path<String>,
    State(state): State<SceneState>,
) -> Result<impl IntoResponse, ApiError> {
    let mode: SceneMode = mode.parse()?;
    let commands = state.scenes.plan(mode).await?;

    let plan: Vec<_> = commands
        .into_iter()
        .map(|command| {
            serde_json::json!({
                "deviceId": command.device_id,
                "status": command.status,
            })
        })
        .collect();

    Ok(Json(plan))
}

/// Kick off a scene and return immediately; the sequence runs in the
/// background and individual device failures are logged, not reported.
pub async fn activate_scene(
    Path(mode): Path<String>,
    State(state): State<SceneState>,
) -> Result<impl IntoResponse, ApiError> {
    let mode: SceneMode = mode.parse()?;

    let scenes = state.scenes.clone();
    tokio::spawn(async move {
        if let Err(e) = scenes.run(mode).await {
            tracing::error!("scene {} failed: {}", mode, e);
        }
    });

    Ok((StatusCode::ACCEPTED, format!("scene started: {}", mode)))
}
