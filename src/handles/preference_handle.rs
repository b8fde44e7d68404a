use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::ApiError;
use crate::repositories::{PreferenceRepository, RoomRepository};
use crate::services::MqttBroker;

/// Outbound topic carrying preference change records.
pub const TOPIC_PREFERENCE_CHANGES: &str = "preferences";

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceBody {
    pub preference_id: String,
    pub room_id: String,
    pub preference_type: String,
    pub preference_name: String,
    pub preference_value: f64,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceUpdateBody {
    pub preference_type: Option<String>,
    pub preference_name: Option<String>,
    pub preference_value: Option<f64>,
}

#[derive(Clone)]
pub struct PreferenceState {
    pub preferences: PreferenceRepository,
    pub rooms: RoomRepository,
    pub broker: Arc<dyn MqttBroker>,
}

pub async fn create_preference(
    State(state): State<PreferenceState>,
    Json(body): Json<PreferenceBody>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&body.room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    if state.preferences.find_by_id(&body.preference_id).await?.is_some() {
        return Err(ApiError::Conflict("preference"));
    }

    let preference = state
        .preferences
        .create(
            &body.preference_id,
            &body.room_id,
            &body.preference_type,
            &body.preference_name,
            body.preference_value,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(preference)))
}

pub async fn get_preferences_by_room(
    Path(room_id): Path<String>,
    State(state): State<PreferenceState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    let preferences = state.preferences.find_by_room_id(&room_id).await?;

    Ok(Json(preferences))
}

pub async fn get_preference(
    Path(preference_id): Path<String>,
    State(state): State<PreferenceState>,
) -> Result<impl IntoResponse, ApiError> {
    let preference = state
        .preferences
        .find_by_id(&preference_id)
        .await?
        .ok_or(ApiError::NotFound("preference"))?;

    Ok(Json(preference))
}

pub async fn update_preference(
    Path(preference_id): Path<String>,
    State(state): State<PreferenceState>,
    Json(body): Json<PreferenceUpdateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let preference = state
        .preferences
        .update(
            &preference_id,
            body.preference_type.as_deref(),
            body.preference_name.as_deref(),
            body.preference_value,
        )
        .await?
        .ok_or(ApiError::NotFound("preference"))?;

    let record = json!({
        "preferenceId": preference.preference_id,
        "preferenceValue": preference.preference_value,
    });

    if let Err(e) = state
        .broker
        .publish(TOPIC_PREFERENCE_CHANGES, &record.to_string())
        .await
    {
        tracing::warn!("failed to broadcast preference {}: {}", preference.preference_id, e);
    }

    Ok(Json(preference))
}

pub async fn delete_preference(
    Path(preference_id): Path<String>,
    State(state): State<PreferenceState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.preferences.delete(&preference_id).await? {
        return Err(ApiError::NotFound("preference"));
    }

    Ok(StatusCode::NO_CONTENT)
}
