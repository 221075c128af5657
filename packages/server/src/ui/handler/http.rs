//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::{GetRoomDetailError, RoomView},
};
use pomoroom_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let rooms = state.get_rooms_usecase.execute().await.map_err(|e| {
        tracing::error!("Failed to get rooms: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(rooms.iter().map(to_summary).collect()))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto {
            summary: to_summary(&room),
            work_duration: room.durations.work,
            break_duration: room.durations.r#break,
        })),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(GetRoomDetailError::InvalidRoomId(_)) => Err(StatusCode::BAD_REQUEST),
        Err(GetRoomDetailError::Engine(e)) => {
            tracing::error!("Failed to get room detail: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// Domain Model から DTO への変換
fn to_summary(room: &RoomView) -> RoomSummaryDto {
    RoomSummaryDto {
        id: room.snapshot.room_id.as_str().to_string(),
        phase: room.snapshot.phase.into(),
        time: room.snapshot.time,
        is_active: room.snapshot.is_active,
        completed_pomodoros: room.snapshot.completed_pomodoros,
        subscribers: room.subscribers,
        created_at: timestamp_to_jst_rfc3339(room.created_at.value()).unwrap_or_default(),
    }
}
