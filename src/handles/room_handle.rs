use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::repositories::RoomRepository;

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBody {
    pub room_id: String,
    pub room_type: String,
    pub room_name: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdateBody {
    pub room_type: Option<String>,
    pub room_name: Option<String>,
}

#[derive(Clone)]
pub struct RoomState {
    pub rooms: RoomRepository,
}

pub async fn create_room(
    State(state): State<RoomState>,
    Json(body): Json<RoomBody>,
) -> Result<impl IntoResponse, ApiError> {
    if state.rooms.exists_by_id(&body.room_id).await? {
        return Err(ApiError::Conflict("room"));
    }

    let room = state
        .rooms
        .create(&body.room_id, &body.room_type, &body.room_name)
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn get_rooms(State(state): State<RoomState>) -> Result<impl IntoResponse, ApiError> {
    let rooms = state.rooms.find_all().await?;

    Ok(Json(rooms))
}

pub async fn get_room(
    Path(room_id): Path<String>,
    State(state): State<RoomState>,
) -> Result<impl IntoResponse, ApiError> {
    let room = state
        .rooms
        .find_by_id(&room_id)
        .await?
        .ok_or(ApiError::NotFound("room"))?;

    Ok(Json(room))
}

pub async fn update_room(
    Path(room_id): Path<String>,
    State(state): State<RoomState>,
    Json(body): Json<RoomUpdateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let room = state
        .rooms
        .update(&room_id, body.room_type.as_deref(), body.room_name.as_deref())
        .await?
        .ok_or(ApiError::NotFound("room"))?;

    Ok(Json(room))
}

pub async fn delete_room(
    Path(room_id): Path<String>,
    State(state): State<RoomState>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.rooms.delete(&room_id).await? {
        return Err(ApiError::NotFound("room"));
    }

    Ok(StatusCode::NO_CONTENT)
}
