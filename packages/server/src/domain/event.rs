//! Room の購読者へ送るイベント

use super::{RoomId, TimerSnapshot};

/// Timer Engine が送信するイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// 複数のフィールドが変わった時の全状態
    StateChanged(TimerSnapshot),
    /// 何も起きなかった 1 秒の差分
    Tick { room_id: RoomId, time: u32 },
}

impl TimerEvent {
    pub fn room_id(&self) -> &RoomId {
        match self {
            TimerEvent::StateChanged(snapshot) => &snapshot.room_id,
            TimerEvent::Tick { room_id, .. } => room_id,
        }
    }
}
