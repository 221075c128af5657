//! MessagePusher trait 定義
//!
//! Room の購読者へのイベント配信のインターフェース。
//! WebSocket 等の具体的な配信手段は Infrastructure 層が実装します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, RoomId, SubscriberId, TimerEvent};

/// クライアントへの送信チャンネル（エンコード済みのテキスト）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Message Pusher trait
///
/// 配信は投げっぱなし。届かない購読者はログに残してスキップする。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, subscriber_id: SubscriberId, sender: PusherChannel);

    /// 接続の登録を解除し、全ての Room の購読からも外す
    async fn unregister_client(&self, subscriber_id: &SubscriberId);

    /// Room の配信先に加える
    async fn subscribe(&self, room_id: &RoomId, subscriber_id: &SubscriberId);

    /// Room の購読者数
    async fn subscriber_count(&self, room_id: &RoomId) -> usize;

    /// 特定の購読者だけに送信
    async fn push_to(
        &self,
        subscriber_id: &SubscriberId,
        event: &TimerEvent,
    ) -> Result<(), MessagePushError>;

    /// Room の全購読者に送信
    async fn broadcast(&self, room_id: &RoomId, event: &TimerEvent)
    -> Result<(), MessagePushError>;
}
