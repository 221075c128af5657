//! UseCase layer: タイマー操作と参照のユースケース

pub mod connect_subscriber;
pub mod disconnect_subscriber;
pub mod dispatch_command;
pub mod engine_loop;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod timer_engine;

#[cfg(test)]
mod testing;

pub use connect_subscriber::ConnectSubscriberUseCase;
pub use disconnect_subscriber::DisconnectSubscriberUseCase;
pub use dispatch_command::DispatchCommandUseCase;
pub use engine_loop::{EngineCommand, EngineHandle, spawn_engine};
pub use error::{EngineError, GetRoomDetailError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use timer_engine::{CommandOutcome, IgnoreReason, RoomView, TimerEngine};
