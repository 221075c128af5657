//! UseCase: Room 一覧取得

use super::{EngineHandle, RoomView, error::EngineError};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    engine: EngineHandle,
}

impl GetRoomsUseCase {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// 全ての Room を ID 順で取得
    pub async fn execute(&self) -> Result<Vec<RoomView>, EngineError> {
        self.engine.list_rooms().await
    }
}
