//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket 接続ごとの `UnboundedSender` を管理
//! - Room ごとの購読者集合を管理
//! - イベントを JSON にエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 購読者集合はトランスポートの関心事なので Room エンティティには持たせません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, PusherChannel, RoomId, SubscriberId, TimerEvent},
    infrastructure::dto::websocket::ServerMessage,
};

#[derive(Default)]
struct Registry {
    /// 接続中のクライアントの WebSocket sender
    clients: HashMap<SubscriberId, PusherChannel>,
    /// Room ID → 購読者
    subscriptions: HashMap<RoomId, HashSet<SubscriberId>>,
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    registry: Mutex<Registry>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn encode(event: &TimerEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerMessage::from(event))
        .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, subscriber_id: SubscriberId, sender: PusherChannel) {
        let mut registry = self.registry.lock().await;
        registry.clients.insert(subscriber_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", subscriber_id);
    }

    async fn unregister_client(&self, subscriber_id: &SubscriberId) {
        let mut registry = self.registry.lock().await;
        registry.clients.remove(subscriber_id);
        for subscribers in registry.subscriptions.values_mut() {
            subscribers.remove(subscriber_id);
        }
        registry
            .subscriptions
            .retain(|_, subscribers| !subscribers.is_empty());
        tracing::debug!("Client '{}' unregistered from MessagePusher", subscriber_id);
    }

    async fn subscribe(&self, room_id: &RoomId, subscriber_id: &SubscriberId) {
        let mut registry = self.registry.lock().await;
        if !registry.clients.contains_key(subscriber_id) {
            tracing::warn!(
                "Client '{}' is not registered, not subscribing to room '{}'",
                subscriber_id,
                room_id
            );
            return;
        }
        registry
            .subscriptions
            .entry(room_id.clone())
            .or_default()
            .insert(*subscriber_id);
        tracing::debug!("Client '{}' subscribed to room '{}'", subscriber_id, room_id);
    }

    async fn subscriber_count(&self, room_id: &RoomId) -> usize {
        let registry = self.registry.lock().await;
        registry.subscriptions.get(room_id).map_or(0, HashSet::len)
    }

    async fn push_to(
        &self,
        subscriber_id: &SubscriberId,
        event: &TimerEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let registry = self.registry.lock().await;

        let sender = registry
            .clients
            .get(subscriber_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(subscriber_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed event to client '{}'", subscriber_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        room_id: &RoomId,
        event: &TimerEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let registry = self.registry.lock().await;

        let Some(subscribers) = registry.subscriptions.get(room_id) else {
            tracing::trace!("Room '{}' has no subscribers, dropping event", room_id);
            return Ok(());
        };

        for subscriber_id in subscribers {
            match registry.clients.get(subscriber_id) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!(
                            "Failed to push event to client '{}': {}",
                            subscriber_id,
                            e
                        );
                    }
                }
                None => tracing::warn!(
                    "Client '{}' not found during broadcast, skipping",
                    subscriber_id
                ),
            }
        }
        tracing::trace!(
            "Broadcasted event to {} client(s) in room '{}'",
            subscribers.len(),
            room_id
        );

        Ok(())
    }
}
