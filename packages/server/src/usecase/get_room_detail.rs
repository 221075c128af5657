//! UseCase: Room 詳細取得

use crate::domain::RoomId;

use super::{EngineHandle, RoomView, error::GetRoomDetailError};

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    engine: EngineHandle,
}

impl GetRoomDetailUseCase {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Room 詳細を取得
    ///
    /// # Arguments
    ///
    /// * `room_id` - パスから受け取った生の Room ID
    ///
    /// # Returns
    ///
    /// * `Ok(RoomView)` - Room が存在する
    /// * `Err(GetRoomDetailError)` - ID が不正、Room が無い、または engine が停止している
    pub async fn execute(&self, room_id: String) -> Result<RoomView, GetRoomDetailError> {
        let room_id = RoomId::new(room_id)?;
        self.engine
            .get_room(room_id)
            .await?
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
