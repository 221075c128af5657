//! UseCase: 購読者（WebSocket 接続）の登録
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSubscriberUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに一意な購読者 ID が払い出され、送信チャンネルが登録されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 複数接続で ID が重複しないこと

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, SubscriberId};

/// 購読者登録のユースケース
pub struct ConnectSubscriberUseCase {
    /// MessagePusher（イベント配信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSubscriberUseCase {
    /// 新しい ConnectSubscriberUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 購読者登録を実行
    ///
    /// この時点ではどの Room も購読していない。Room への参加は `room:join` で行う。
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 新しく払い出した購読者 ID
    pub async fn execute(&self, sender: PusherChannel) -> SubscriberId {
        let subscriber_id = SubscriberId::generate();
        self.message_pusher
            .register_client(subscriber_id, sender)
            .await;
        subscriber_id
    }
}
