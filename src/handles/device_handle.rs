use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::repositories::{DeviceRepository, RoomRepository};
use crate::services::DeviceService;

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBody {
    pub device_id: String,
    pub room_id: String,
    pub device_type: String,
    pub device_name: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdateBody {
    pub device_type: Option<String>,
    pub device_name: Option<String>,
}

#[derive(Clone)]
pub struct DeviceState {
    pub devices: DeviceRepository,
    pub rooms: RoomRepository,
    pub control: Arc<DeviceService>,
}

pub async fn create_device(
    State(state): State<DeviceState>,
    Json(body): Json<DeviceBody>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&body.room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    if state.devices.exists_by_id(&body.device_id).await? {
        return Err(ApiError::Conflict("device"));
    }

    let device = state
        .devices
        .create(&body.device_id, &body.room_id, &body.device_type, &body.device_name)
        .await?;

    Ok((StatusCode::CREATED, Json(device)))
}

pub async fn get_devices(State(state): State<DeviceState>) -> Result<impl IntoResponse, ApiError> {
    let devices = state.devices.find_all().await?;

    Ok(Json(devices))
}

pub async fn get_devices_by_room(
    Path(room_id): Path<String>,
    State(state): State<DeviceState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.exists_by_id(&room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    let devices = state.devices.find_by_room_id(&room_id).await?;

    Ok(Json(devices))
}

pub async fn get_device(
    Path(device_id): Path<String>,
    State(state): State<DeviceState>,
) -> Result<impl IntoResponse, ApiError> {
    let device = state
        .devices
        .find_by_id(&device_id)
        .await?
        .ok_or(ApiError::NotFound("device"))?;

    Ok(Json(device))
}

pub async fn update_device(
    Path(device_id): Path<String>,
    State(state): State<DeviceState>,
    Json(body): Json<DeviceUpdateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let device = state
        .devices
        .update_info(&device_id, body.device_type.as_deref(), body.device_name.as_deref())
        .await?
        .ok_or(ApiError::NotFound("device"))?;

    Ok(Json(device))
}

pub async fn delete_device(
    Path(device_id): Path<String>,
    State(state): State<DeviceState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.devices.delete(&device_id).await? {
        return Err(ApiError::NotFound("device"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the device between `on` and `off` and report the stored status.
pub async fn toggle_device(
    Path(device_id): Path<String>,
    State(state): State<DeviceState>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.control.toggle(&device_id).await?;

    Ok(status)
}

/// Drive the device to an explicit status. Anything other than `on` is
/// stored as `off`; the response carries what was actually stored.
pub async fn control_device(
    Path((device_id, status)): Path<(String, String)>,
    State(state): State<DeviceState>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state.control.set_status(&device_id, &status).await?;

    Ok(stored)
}
