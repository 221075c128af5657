//! Conversion logic between DTOs and domain types.

use serde_json::Value;

use crate::domain::{Phase, TimerEvent, TimerSettings};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::SettingsDto> for TimerSettings {
    fn from(dto: dto::SettingsDto) -> Self {
        Self {
            work_secs: dto.work_minutes.as_ref().and_then(secs_from_minutes),
            break_secs: dto.break_minutes.as_ref().and_then(secs_from_minutes),
        }
    }
}

/// Convert a minutes value into a positive whole number of seconds.
///
/// Numbers and numeric strings are accepted, including fractions such as
/// `0.5` as long as they come out to whole seconds. Anything else
/// (negative, zero, non-numeric, overflowing) is treated as absent.
fn secs_from_minutes(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let secs = minutes * 60.0;
    if !secs.is_finite() || secs.fract() != 0.0 || secs <= 0.0 || secs > u32::MAX as f64 {
        return None;
    }
    Some(secs as u32)
}

// ========================================
// Domain → DTO
// ========================================

impl From<Phase> for dto::PhaseDto {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Work => Self::Work,
            Phase::Break => Self::Break,
        }
    }
}

impl From<&TimerEvent> for dto::ServerMessage {
    fn from(event: &TimerEvent) -> Self {
        match event {
            TimerEvent::StateChanged(snapshot) => Self::StateChanged {
                room_id: snapshot.room_id.as_str().to_string(),
                time: snapshot.time,
                is_active: snapshot.is_active,
                phase: snapshot.phase.into(),
                completed_pomodoros: snapshot.completed_pomodoros,
            },
            TimerEvent::Tick { room_id, time } => Self::Tick {
                room_id: room_id.as_str().to_string(),
                time: *time,
            },
        }
    }
}
