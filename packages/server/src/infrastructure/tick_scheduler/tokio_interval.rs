//! `tokio::time::interval` を使った TickScheduler 実装
//!
//! driver ごとに 1 つのタスクを spawn し、間隔ごとに `TickSignal` を
//! Timer Engine の tick キューへ送ります。停止は `AbortHandle` で行います。

use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{self, Instant},
};

use crate::domain::{DriverHandle, DriverId, RoomId, TickScheduler, TickSignal};

/// tokio の interval で動く TickScheduler
pub struct TokioTickScheduler {
    /// Timer Engine の tick キュー
    ticks: mpsc::UnboundedSender<TickSignal>,
    /// tick の間隔（通常は 1 秒）
    period: Duration,
}

impl TokioTickScheduler {
    pub fn new(ticks: mpsc::UnboundedSender<TickSignal>, period: Duration) -> Self {
        Self { ticks, period }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn arm(&self, room_id: &RoomId, driver_id: DriverId) -> DriverHandle {
        let ticks = self.ticks.clone();
        let period = self.period;
        let signal = TickSignal {
            room_id: room_id.clone(),
            driver_id,
        };

        let task = tokio::spawn(async move {
            // 最初の tick は 1 周期後
            let mut ticker = time::interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if ticks.send(signal.clone()).is_err() {
                    tracing::debug!("Tick queue closed, stopping {}", signal.driver_id);
                    break;
                }
            }
        });

        tracing::debug!("Armed {} for room '{}' every {:?}", driver_id, room_id, period);
        let abort = task.abort_handle();
        DriverHandle::new(driver_id, move || abort.abort())
    }
}
