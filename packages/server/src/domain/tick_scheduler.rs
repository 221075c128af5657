//! TickScheduler trait 定義
//!
//! Room のカウントダウンを 1 秒ごとに進める周期 driver の抽象化。
//! 具体的な実装（tokio の interval など）は Infrastructure 層が提供します。

use std::fmt;

use super::{DriverId, RoomId};

/// driver が tick ごとに Timer Engine へ送るシグナル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSignal {
    pub room_id: RoomId,
    pub driver_id: DriverId,
}

/// 周期 driver の所有権トークン
///
/// Room が排他的に所有する。`cancel` するか drop すると driver は停止する。
pub struct DriverHandle {
    id: DriverId,
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl DriverHandle {
    pub fn new(id: DriverId, cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> DriverId {
        self.id
    }

    /// driver を停止する
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverHandle")
            .field("id", &self.id)
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Tick Scheduler trait
///
/// `arm` は `room_id` 宛ての `TickSignal` を一定間隔で送り続ける driver を起動し、
/// その所有権トークンを返す。
#[cfg_attr(test, mockall::automock)]
pub trait TickScheduler: Send + Sync {
    fn arm(&self, room_id: &RoomId, driver_id: DriverId) -> DriverHandle;
}
