//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `type`, e.g.
//!
//! ```text
//! {"type":"room:join","roomId":"team","settings":{"workMinutes":25,"breakMinutes":5}}
//! {"type":"timer:start","roomId":"team"}
//! {"type":"timer:tick","roomId":"team","time":1499}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Messages sent by clients
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "room:join", rename_all = "camelCase")]
    Join {
        room_id: String,
        #[serde(default, deserialize_with = "lenient_settings")]
        settings: SettingsDto,
    },
    #[serde(rename = "timer:start", rename_all = "camelCase")]
    Start { room_id: String },
    #[serde(rename = "timer:pause", rename_all = "camelCase")]
    Pause { room_id: String },
    #[serde(rename = "timer:reset", rename_all = "camelCase")]
    Reset { room_id: String },
    #[serde(rename = "timer:togglePhase", rename_all = "camelCase")]
    TogglePhase { room_id: String },
}

/// Timer settings requested on join.
///
/// Fields are kept as raw JSON so that a malformed value only drops that
/// field instead of rejecting the whole join.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SettingsDto {
    #[serde(default, rename = "workMinutes", alias = "workTime")]
    pub work_minutes: Option<Value>,
    #[serde(default, rename = "breakMinutes", alias = "breakTime")]
    pub break_minutes: Option<Value>,
}

/// Accept `null`, a missing field or any non-object as "no settings".
fn lenient_settings<'de, D>(deserializer: D) -> Result<SettingsDto, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

/// Timer phase on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseDto {
    Work,
    Break,
}

/// Messages sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Full snapshot
    #[serde(rename = "timer:stateChanged", rename_all = "camelCase")]
    StateChanged {
        room_id: String,
        time: u32,
        is_active: bool,
        phase: PhaseDto,
        completed_pomodoros: u32,
    },
    /// Per-second delta
    #[serde(rename = "timer:tick", rename_all = "camelCase")]
    Tick { room_id: String, time: u32 },
}
