use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::ApiError;
use crate::repositories::{RoomRepository, ThresholdRepository};
use crate::services::MqttBroker;

/// Outbound topic carrying threshold change records.
pub const TOPIC_THRESHOLD_CHANGES: &str = "thresholds";

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdBody {
    pub threshold_id: String,
    pub room_id: String,
    pub threshold_type: String,
    pub threshold_name: String,
    pub low_threshold: f64,
    pub high_threshold: f64,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdUpdateBody {
    pub threshold_type: Option<String>,
    pub threshold_name: Option<String>,
    pub low_threshold: Option<f64>,
    pub high_threshold: Option<f64>,
}

#[derive(Clone)]
pub struct ThresholdState {
    pub thresholds: ThresholdRepository,
    pub rooms: RoomRepository,
    pub broker: Arc<dyn MqttBroker>,
}

pub async fn create_threshold(
    State(state): State<ThresholdState>,
    Json(body): Json<ThresholdBody>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&body.room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    if state.thresholds.find_by_id(&body.threshold_id).await?.is_some() {
        return Err(ApiError::Conflict("threshold"));
    }

    let threshold = state
        .thresholds
        .create(
            &body.threshold_id,
            &body.room_id,
            &body.threshold_type,
            &body.threshold_name,
            body.low_threshold,
            body.high_threshold,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(threshold)))
}

pub async fn get_thresholds_by_room(
    Path(room_id): Path<String>,
    State(state): State<ThresholdState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    let thresholds = state.thresholds.find_by_room_id(&room_id).await?;

    Ok(Json(thresholds))
}

pub async fn get_threshold(
    Path(threshold_id): Path<String>,
    State(state): State<ThresholdState>,
) -> Result<impl IntoResponse, ApiError> {
    let threshold = state
        .thresholds
        .find_by_id(&threshold_id)
        .await?
        .ok_or(ApiError::NotFound("threshold"))?;

    Ok(Json(threshold))
}

pub async fn update_threshold(
    Path(threshold_id): Path<String>,
    State(state): State<ThresholdState>,
    Json(body): Json<ThresholdUpdateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let threshold = state
        .thresholds
        .update(
            &threshold_id,
            body.threshold_type.as_deref(),
            body.threshold_name.as_deref(),
            body.low_threshold,
            body.high_threshold,
        )
        .await?
        .ok_or(ApiError::NotFound("threshold"))?;

    let record = json!({
        "thresholdId": threshold.threshold_id,
        "lowThreshold": threshold.low_threshold,
        "highThreshold": threshold.high_threshold,
    });

    if let Err(e) = state
        .broker
        .publish(TOPIC_THRESHOLD_CHANGES, &record.to_string())
        .await
    {
        tracing::warn!("failed to broadcast threshold {}: {}", threshold.threshold_id, e);
    }

    Ok(Json(threshold))
}

pub async fn delete_threshold(
    Path(threshold_id): Path<String>,
    State(state): State<ThresholdState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.thresholds.delete(&threshold_id).await? {
        return Err(ApiError::NotFound("threshold"));
    }

    Ok(StatusCode::NO_CONTENT)
}
