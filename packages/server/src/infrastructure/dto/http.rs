//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::PhaseDto;

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub phase: PhaseDto,
    pub time: u32,
    pub is_active: bool,
    pub completed_pomodoros: u32,
    pub subscribers: usize,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// Body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    #[serde(flatten)]
    pub summary: RoomSummaryDto,
    /// seconds
    pub work_duration: u32,
    /// seconds
    pub break_duration: u32,
}
