//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectSubscriberUseCase, DisconnectSubscriberUseCase, DispatchCommandUseCase,
    GetRoomDetailUseCase, GetRoomsUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSubscriberUseCase（購読者登録のユースケース）
    pub connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    /// DisconnectSubscriberUseCase（購読者切断のユースケース）
    pub disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
    /// DispatchCommandUseCase（タイマー操作のユースケース）
    pub dispatch_command_usecase: Arc<DispatchCommandUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
