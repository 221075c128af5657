//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB（Room のアリーナ）として使用します。
//! プロセスが終了すると全ての Room は消えます。

use std::{collections::HashMap, sync::Arc};

use pomoroom_shared::time::Clock;

use crate::domain::{PhaseDurations, Room, RoomId, RoomRepository, TimerSettings, Timestamp};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ID → Room
    rooms: HashMap<RoomId, Room>,
    /// join 時に設定が無い場合の長さ
    defaults: PhaseDurations,
    /// Room の作成時刻に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(defaults: PhaseDurations, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: HashMap::new(),
            defaults,
            clock,
        }
    }
}

impl RoomRepository for InMemoryRoomRepository {
    fn get_or_create(&mut self, room_id: RoomId, settings: TimerSettings) -> &mut Room {
        let defaults = self.defaults;
        let clock = &self.clock;
        self.rooms.entry(room_id).or_insert_with_key(|room_id| {
            let durations = PhaseDurations::resolve(&settings, defaults);
            tracing::info!(
                "Room '{}' created (work: {}s, break: {}s)",
                room_id,
                durations.work,
                durations.r#break
            );
            Room::new(
                room_id.clone(),
                durations,
                Timestamp::new(clock.now_jst_millis()),
            )
        })
    }

    fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    fn list(&self) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }
}
