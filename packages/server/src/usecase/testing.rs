//! UseCase テスト用のヘルパー

use std::{sync::Arc, time::Duration};

use pomoroom_shared::time::ManualClock;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{MessagePusher, PhaseDurations},
    infrastructure::{repository::InMemoryRoomRepository, tick_scheduler::TokioTickScheduler},
};

use super::{EngineHandle, TimerEngine, spawn_engine};

/// 1 秒周期の driver とインメモリの Repository で engine loop を起動する
pub(crate) fn spawn_test_engine(
    message_pusher: Arc<dyn MessagePusher>,
) -> (EngineHandle, JoinHandle<()>) {
    let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
    let tick_scheduler = Arc::new(TokioTickScheduler::new(ticks_tx, Duration::from_secs(1)));
    let repository = Box::new(InMemoryRoomRepository::new(
        PhaseDurations::default(),
        Arc::new(ManualClock::new(0)),
    ));
    spawn_engine(
        TimerEngine::new(repository, message_pusher, tick_scheduler),
        ticks_rx,
    )
}
