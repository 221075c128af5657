//! Domain layer: タイマーの状態とその変更ルール、外部とのポート

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod tick_scheduler;
pub mod value_object;

pub use entity::{Room, TickOutcome, TimerSnapshot};
pub use error::{MessagePushError, ValueObjectError};
pub use event::TimerEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use tick_scheduler::{DriverHandle, TickScheduler, TickSignal};
pub use value_object::{
    DriverId, Phase, PhaseDurations, ROOM_ID_MAX_LEN, RoomId, SubscriberId, TimerSettings,
    Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use tick_scheduler::MockTickScheduler;
