//! Dependency wiring.

use std::sync::Arc;

use pomoroom_shared::time::SystemClock;
use tokio::sync::mpsc;

use crate::{
    config::TimerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        tick_scheduler::TokioTickScheduler,
    },
    ui::Server,
    usecase::{
        ConnectSubscriberUseCase, DisconnectSubscriberUseCase, DispatchCommandUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, TimerEngine, spawn_engine,
    },
};

/// Build the server and spawn the timer engine.
///
/// Must be called inside a tokio runtime. The engine stops once the returned
/// server (and every use case it holds) is dropped.
pub fn build_server(timer: TimerConfig) -> Server {
    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. TickScheduler
    // 4. Timer Engine
    // 5. UseCases
    // 6. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Box::new(InMemoryRoomRepository::new(
        timer.defaults,
        Arc::new(SystemClock),
    ));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create TickScheduler (tokio interval implementation)
    let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
    let tick_scheduler = Arc::new(TokioTickScheduler::new(ticks_tx, timer.tick_interval));

    // 4. Spawn the Timer Engine
    let engine = TimerEngine::new(repository, message_pusher.clone(), tick_scheduler);
    let (engine, _engine_task) = spawn_engine(engine, ticks_rx);
    tracing::info!(
        "Timer engine ready (work: {}s, break: {}s, tick: {:?})",
        timer.defaults.work,
        timer.defaults.r#break,
        timer.tick_interval
    );

    // 5. Create UseCases
    let connect_subscriber_usecase =
        Arc::new(ConnectSubscriberUseCase::new(message_pusher.clone()));
    let disconnect_subscriber_usecase =
        Arc::new(DisconnectSubscriberUseCase::new(message_pusher.clone()));
    let dispatch_command_usecase = Arc::new(DispatchCommandUseCase::new(engine.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(engine.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(engine));

    // 6. Create the server
    Server::new(
        connect_subscriber_usecase,
        disconnect_subscriber_usecase,
        dispatch_command_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    )
}
