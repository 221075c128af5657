//! Infrastructure layer: ドメイン層のポートの具体的な実装とワイヤ形式

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod tick_scheduler;
