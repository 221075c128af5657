//! UseCase: Room タイマーの状態遷移
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - join / start / pause / reset / togglePhase と内部の tick の状態遷移
//! - 各操作で送信されるイベント（stateChanged / tick）と送信先
//!
//! ### なぜこのテストが必要か
//! - 全ての参加者の表示が一致するには、同じ操作列から同じイベント列が出る必要がある
//! - driver が二重に動くとカウントダウンが 2 倍速になる
//!
//! ### どのような状況を想定しているか
//! - 正常系：開始・一時停止・リセット・フェーズ切り替え・自然なフェーズ移行
//! - 冪等性：start / pause の連打
//! - エッジケース：存在しない Room への操作、停止済み driver の tick

use std::sync::Arc;

use crate::domain::{
    DriverId, MessagePusher, PhaseDurations, RoomId, RoomRepository, SubscriberId, TickOutcome,
    TickScheduler, TickSignal, TimerEvent, TimerSettings, TimerSnapshot, Timestamp,
};

/// コマンドが何もしなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    RoomNotFound,
    AlreadyRunning,
    AlreadyPaused,
    /// 停止済み（または別の）driver からの tick
    StaleDriver,
}

/// コマンドの処理結果
///
/// `Ignored` の場合イベントは一切送信されていない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Ignored(IgnoreReason),
}

/// HTTP API 向けの Room の読み取りモデル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub snapshot: TimerSnapshot,
    pub durations: PhaseDurations,
    pub created_at: Timestamp,
    pub subscribers: usize,
}

/// Room タイマーのユースケース
///
/// Repository を排他的に所有し、1 度に 1 つの操作だけを処理する前提
/// （`engine_loop` が保証する）。
pub struct TimerEngine {
    /// Repository（Room のレジストリ）
    repository: Box<dyn RoomRepository>,
    /// MessagePusher（イベント配信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// TickScheduler（周期 driver の抽象化）
    tick_scheduler: Arc<dyn TickScheduler>,
    /// 最後に払い出した driver ID
    last_driver_id: u64,
}

impl TimerEngine {
    /// 新しい TimerEngine を作成
    pub fn new(
        repository: Box<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        tick_scheduler: Arc<dyn TickScheduler>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            tick_scheduler,
            last_driver_id: 0,
        }
    }

    /// Room に参加する
    ///
    /// 購読者として登録し、Room が無ければ `settings` で作成してから、
    /// 現在の全状態を参加者本人にだけ送る。
    pub async fn join(
        &mut self,
        subscriber_id: SubscriberId,
        room_id: RoomId,
        settings: TimerSettings,
    ) -> CommandOutcome {
        self.message_pusher.subscribe(&room_id, &subscriber_id).await;

        let snapshot = self.repository.get_or_create(room_id, settings).snapshot();
        let event = TimerEvent::StateChanged(snapshot);
        if let Err(e) = self.message_pusher.push_to(&subscriber_id, &event).await {
            tracing::warn!("Failed to send room state to '{}': {}", subscriber_id, e);
        }

        CommandOutcome::Applied
    }

    /// カウントダウンを開始する
    pub async fn start(&mut self, room_id: &RoomId) -> CommandOutcome {
        let Some(room) = self.repository.get_mut(room_id) else {
            return CommandOutcome::Ignored(IgnoreReason::RoomNotFound);
        };
        if room.is_active() {
            return CommandOutcome::Ignored(IgnoreReason::AlreadyRunning);
        }

        self.last_driver_id += 1;
        let driver_id = DriverId::new(self.last_driver_id);
        room.arm(self.tick_scheduler.arm(room_id, driver_id));
        let snapshot = room.snapshot();

        tracing::info!("Room '{}' started ({})", room_id, driver_id);
        self.broadcast(TimerEvent::StateChanged(snapshot)).await;
        CommandOutcome::Applied
    }

    /// カウントダウンを一時停止する
    pub async fn pause(&mut self, room_id: &RoomId) -> CommandOutcome {
        let Some(room) = self.repository.get_mut(room_id) else {
            return CommandOutcome::Ignored(IgnoreReason::RoomNotFound);
        };
        if !room.disarm() {
            return CommandOutcome::Ignored(IgnoreReason::AlreadyPaused);
        }
        let snapshot = room.snapshot();

        tracing::info!("Room '{}' paused at {}s", room_id, snapshot.time);
        self.broadcast(TimerEvent::StateChanged(snapshot)).await;
        CommandOutcome::Applied
    }

    /// 初期状態（WORK, 完了数 0, 停止）に戻す
    pub async fn reset(&mut self, room_id: &RoomId) -> CommandOutcome {
        let Some(room) = self.repository.get_mut(room_id) else {
            return CommandOutcome::Ignored(IgnoreReason::RoomNotFound);
        };
        room.disarm();
        room.rewind();
        let snapshot = room.snapshot();

        tracing::info!("Room '{}' reset", room_id);
        self.broadcast(TimerEvent::StateChanged(snapshot)).await;
        CommandOutcome::Applied
    }

    /// フェーズを手動で切り替える
    ///
    /// 一旦停止した状態を通知し、元々動いていた場合だけ新しいフェーズで再開する。
    /// 完了数は変えない。
    pub async fn toggle_phase(&mut self, room_id: &RoomId) -> CommandOutcome {
        let Some(room) = self.repository.get_mut(room_id) else {
            return CommandOutcome::Ignored(IgnoreReason::RoomNotFound);
        };
        let was_active = room.disarm();
        room.flip_phase();
        let snapshot = room.snapshot();

        tracing::info!(
            "Room '{}' switched to {:?} (was running: {})",
            room_id,
            snapshot.phase,
            was_active
        );
        self.broadcast(TimerEvent::StateChanged(snapshot)).await;

        if was_active {
            self.start(room_id).await;
        }
        CommandOutcome::Applied
    }

    /// driver からの tick を処理する
    pub(crate) async fn tick(&mut self, signal: &TickSignal) -> CommandOutcome {
        let Some(room) = self.repository.get_mut(&signal.room_id) else {
            return CommandOutcome::Ignored(IgnoreReason::RoomNotFound);
        };
        if !room.is_driven_by(signal.driver_id) {
            return CommandOutcome::Ignored(IgnoreReason::StaleDriver);
        }

        let event = match room.advance() {
            TickOutcome::Countdown { time } => TimerEvent::Tick {
                room_id: room.id.clone(),
                time,
            },
            TickOutcome::Rollover { from, to } => {
                tracing::info!(
                    "Room '{}' rolled over {:?} -> {:?} (completed: {})",
                    room.id,
                    from,
                    to,
                    room.completed_pomodoros
                );
                TimerEvent::StateChanged(room.snapshot())
            }
        };

        self.broadcast(event).await;
        CommandOutcome::Applied
    }

    /// 全ての Room の読み取りモデル（ID 順）
    pub async fn list_rooms(&self) -> Vec<RoomView> {
        let rooms: Vec<(TimerSnapshot, PhaseDurations, Timestamp)> = self
            .repository
            .list()
            .into_iter()
            .map(|room| (room.snapshot(), room.durations, room.created_at))
            .collect();

        let mut views = Vec::with_capacity(rooms.len());
        for (snapshot, durations, created_at) in rooms {
            let subscribers = self.message_pusher.subscriber_count(&snapshot.room_id).await;
            views.push(RoomView {
                snapshot,
                durations,
                created_at,
                subscribers,
            });
        }
        views
    }

    /// 1 つの Room の読み取りモデル
    pub async fn find_room(&self, room_id: &RoomId) -> Option<RoomView> {
        let (snapshot, durations, created_at) = self
            .repository
            .get(room_id)
            .map(|room| (room.snapshot(), room.durations, room.created_at))?;
        let subscribers = self.message_pusher.subscriber_count(room_id).await;
        Some(RoomView {
            snapshot,
            durations,
            created_at,
            subscribers,
        })
    }

    async fn broadcast(&self, event: TimerEvent) {
        if let Err(e) = self.message_pusher.broadcast(event.room_id(), &event).await {
            tracing::warn!("Failed to broadcast to room '{}': {}", event.room_id(), e);
        }
    }
}
