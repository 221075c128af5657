//! UseCase: 購読者（WebSocket 接続）の切断
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSubscriberUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した購読者にはそれ以降イベントが届かないことを保証
//! - 切断しても Room のタイマー状態は変わらない（最後の 1 人が抜けても動き続ける）
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数 Room を購読していた購読者の切断
//! - エッジケース：最後の購読者の切断

use std::sync::Arc;

use crate::domain::{MessagePusher, SubscriberId};

/// 購読者切断のユースケース
pub struct DisconnectSubscriberUseCase {
    /// MessagePusher（イベント配信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSubscriberUseCase {
    /// 新しい DisconnectSubscriberUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 購読者切断を実行
    ///
    /// 全ての Room の購読から外す。Room 自体には触れない。
    pub async fn execute(&self, subscriber_id: &SubscriberId) {
        self.message_pusher.unregister_client(subscriber_id).await;
    }
}
