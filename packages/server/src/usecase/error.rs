//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Timer Engine との通信エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// engine loop が終了している
    #[error("timer engine is not running")]
    Stopped,
}

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("invalid room id: {0}")]
    InvalidRoomId(#[from] ValueObjectError),

    #[error("room not found")]
    RoomNotFound,

    #[error(transparent)]
    Engine(#[from] EngineError),
}
