use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::repositories::{RoomRepository, SensorRepository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorQuery {
    pub sensor_type: Option<String>,
}

#[derive(Clone)]
pub struct SensorState {
    pub sensors: SensorRepository,
    pub rooms: RoomRepository,
}

/// Latest readings for a room, newest first, capped at 100 rows.
pub async fn get_sensors_by_room(
    Path(room_id): Path<String>,
    Query(query): Query<SensorQuery>,
    State(state): State<SensorState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    let sensors = state
        .sensors
        .find_latest_by_room(&room_id, query.sensor_type.as_deref())
        .await?;

    Ok(Json(sensors))
}
