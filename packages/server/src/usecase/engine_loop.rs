//! Timer Engine を 1 つの tokio タスクで動かす
//!
//! Room の状態に触れるのはこのタスクだけ。WebSocket / HTTP ハンドラからの
//! コマンドと driver からの tick は、それぞれのキューから 1 件ずつ取り出して
//! 最後まで処理してから次に進む。

use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use futures_util::FutureExt;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{RoomId, SubscriberId, TickSignal, TimerSettings};

use super::{
    error::EngineError,
    timer_engine::{CommandOutcome, RoomView, TimerEngine},
};

/// Timer Engine への要求
#[derive(Debug)]
pub enum EngineCommand {
    Join {
        subscriber_id: SubscriberId,
        room_id: RoomId,
        settings: TimerSettings,
    },
    Start(RoomId),
    Pause(RoomId),
    Reset(RoomId),
    TogglePhase(RoomId),
    ListRooms {
        reply: oneshot::Sender<Vec<RoomView>>,
    },
    GetRoom {
        room_id: RoomId,
        reply: oneshot::Sender<Option<RoomView>>,
    },
}

impl EngineCommand {
    fn kind(&self) -> &'static str {
        match self {
            EngineCommand::Join { .. } => "room:join",
            EngineCommand::Start(_) => "timer:start",
            EngineCommand::Pause(_) => "timer:pause",
            EngineCommand::Reset(_) => "timer:reset",
            EngineCommand::TogglePhase(_) => "timer:togglePhase",
            EngineCommand::ListRooms { .. } => "list rooms",
            EngineCommand::GetRoom { .. } => "get room",
        }
    }
}

/// engine loop へコマンドを送るためのハンドル
///
/// 全てのハンドルが drop されると engine loop は終了する。
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// コマンドをキューに積む（処理の完了は待たない）
    pub fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.commands.send(command).map_err(|_| EngineError::Stopped)
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomView>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::ListRooms { reply })?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    pub async fn get_room(&self, room_id: RoomId) -> Result<Option<RoomView>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::GetRoom { room_id, reply })?;
        rx.await.map_err(|_| EngineError::Stopped)
    }
}

/// engine loop を起動する
///
/// # Arguments
///
/// * `engine` - 状態を持つ Timer Engine（タスクに move される）
/// * `ticks` - `TickScheduler` が tick を送るキューの受信側
///
/// # Returns
///
/// コマンド送信用のハンドルと、engine loop タスクの `JoinHandle`
pub fn spawn_engine(
    engine: TimerEngine,
    ticks: mpsc::UnboundedReceiver<TickSignal>,
) -> (EngineHandle, JoinHandle<()>) {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(engine_loop(engine, commands_rx, ticks));
    (
        EngineHandle {
            commands: commands_tx,
        },
        task,
    )
}

async fn engine_loop(
    mut engine: TimerEngine,
    mut commands: mpsc::UnboundedReceiver<EngineCommand>,
    mut ticks: mpsc::UnboundedReceiver<TickSignal>,
) {
    tracing::info!("Timer engine started");

    loop {
        tokio::select! {
            biased;

            Some(signal) = ticks.recv() => {
                guarded("tick", handle_tick(&mut engine, signal)).await;
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                let kind = command.kind();
                guarded(kind, handle_command(&mut engine, command)).await;
            }
        }
    }

    tracing::info!("Timer engine stopped");
}

/// 1 件の処理中に panic しても loop を止めない
async fn guarded(kind: &str, task: impl Future<Output = ()>) {
    if let Err(panic) = AssertUnwindSafe(task).catch_unwind().await {
        tracing::error!(
            "Timer engine panicked while handling {}: {}",
            kind,
            panic_message(panic.as_ref())
        );
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

async fn handle_tick(engine: &mut TimerEngine, signal: TickSignal) {
    if let CommandOutcome::Ignored(reason) = engine.tick(&signal).await {
        tracing::trace!(
            "Dropped tick from {} for room '{}': {:?}",
            signal.driver_id,
            signal.room_id,
            reason
        );
    }
}

async fn handle_command(engine: &mut TimerEngine, command: EngineCommand) {
    let kind = command.kind();
    let (room_id, outcome) = match command {
        EngineCommand::Join {
            subscriber_id,
            room_id,
            settings,
        } => {
            let outcome = engine.join(subscriber_id, room_id.clone(), settings).await;
            (room_id, outcome)
        }
        EngineCommand::Start(room_id) => {
            let outcome = engine.start(&room_id).await;
            (room_id, outcome)
        }
        EngineCommand::Pause(room_id) => {
            let outcome = engine.pause(&room_id).await;
            (room_id, outcome)
        }
        EngineCommand::Reset(room_id) => {
            let outcome = engine.reset(&room_id).await;
            (room_id, outcome)
        }
        EngineCommand::TogglePhase(room_id) => {
            let outcome = engine.toggle_phase(&room_id).await;
            (room_id, outcome)
        }
        EngineCommand::ListRooms { reply } => {
            // 要求側が既に居なくなっていても問題ない
            let _ = reply.send(engine.list_rooms().await);
            return;
        }
        EngineCommand::GetRoom { room_id, reply } => {
            let _ = reply.send(engine.find_room(&room_id).await);
            return;
        }
    };

    if let CommandOutcome::Ignored(reason) = outcome {
        tracing::debug!("Ignored {} for room '{}': {:?}", kind, room_id, reason);
    }
}
