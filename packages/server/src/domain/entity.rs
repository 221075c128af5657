//! Entity 定義
//!
//! `Room` は 1 つの共有タイマーの状態を持つ。状態の変更はこのモジュールの
//! メソッドだけで行い、イベントの送信は UseCase 層の責務とする。

use super::{DriverHandle, DriverId, Phase, PhaseDurations, RoomId, Timestamp};

/// ある時点での Room のタイマー状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub room_id: RoomId,
    pub time: u32,
    pub is_active: bool,
    pub phase: Phase,
    pub completed_pomodoros: u32,
}

/// tick 1 回分の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 残り時間が 1 秒減った
    Countdown { time: u32 },
    /// フェーズが切り替わった
    Rollover { from: Phase, to: Phase },
}

/// 共有タイマーの Room
///
/// `driver` が `Some` の間だけ RUNNING とみなす。driver は常に高々 1 つ。
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub phase: Phase,
    /// 現在のフェーズの残り秒数
    pub time: u32,
    pub durations: PhaseDurations,
    pub completed_pomodoros: u32,
    pub created_at: Timestamp,
    driver: Option<DriverHandle>,
}

impl Room {
    pub fn new(id: RoomId, durations: PhaseDurations, created_at: Timestamp) -> Self {
        Self {
            id,
            phase: Phase::Work,
            time: durations.work,
            durations,
            completed_pomodoros: 0,
            created_at,
            driver: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    pub fn driver_id(&self) -> Option<DriverId> {
        self.driver.as_ref().map(DriverHandle::id)
    }

    /// `driver_id` がこの Room の現在の driver かどうか
    pub fn is_driven_by(&self, driver_id: DriverId) -> bool {
        self.driver_id() == Some(driver_id)
    }

    /// driver を取り付ける。残っている driver があれば先に停止する。
    pub fn arm(&mut self, handle: DriverHandle) {
        if let Some(stale) = self.driver.replace(handle) {
            tracing::warn!(
                "Room '{}' still held {} while arming a new driver, cancelling it",
                self.id,
                stale.id()
            );
            stale.cancel();
        }
    }

    /// driver を停止して取り外す
    ///
    /// # Returns
    ///
    /// 停止前に RUNNING だったかどうか
    pub fn disarm(&mut self) -> bool {
        match self.driver.take() {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// カウントダウンを 1 秒進める
    ///
    /// 残りが 0 になる tick ではその場でフェーズを切り替えるため、
    /// 外から 0 が見えることはない。WORK → BREAK のときだけ完了数を数える。
    pub fn advance(&mut self) -> TickOutcome {
        if self.time > 1 {
            self.time -= 1;
            return TickOutcome::Countdown { time: self.time };
        }

        let from = self.phase;
        if from == Phase::Work {
            self.completed_pomodoros = self.completed_pomodoros.saturating_add(1);
        }
        self.enter(from.flipped());
        TickOutcome::Rollover {
            from,
            to: self.phase,
        }
    }

    /// 手動でフェーズを切り替える（完了数は変えない）
    pub fn flip_phase(&mut self) {
        self.enter(self.phase.flipped());
    }

    /// 初期状態（WORK, 完了数 0）に戻す。driver は呼び出し側で止めること。
    pub fn rewind(&mut self) {
        self.enter(Phase::Work);
        self.completed_pomodoros = 0;
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.time = self.durations.of(phase);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            room_id: self.id.clone(),
            time: self.time,
            is_active: self.is_active(),
            phase: self.phase,
            completed_pomodoros: self.completed_pomodoros,
        }
    }
}
