//! UseCase: 参加者切断処理
//!
//! 切断した参加者を Session Registry と Broadcast Engine から取り除き、
//! 更新後の在席数を残りの全員にブロードキャストします。切断は
//! エラーではなく、通常の状態遷移として扱います。

use std::sync::Arc;

use crate::domain::{ClientId, MessagePusher, ServerEvent, SessionRegistry};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Session Registry（参加者集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `client_id` - 切断したクライアントの ID
    ///
    /// # Returns
    ///
    /// 切断後の在席数。
    pub async fn execute(&self, client_id: &ClientId) -> usize {
        // 1. Broadcast Engine からチャンネルを登録解除
        self.message_pusher.unregister_client(client_id).await;

        // 2. Session Registry から参加者を削除
        self.registry.remove(client_id).await;

        // 3. 更新後の在席数を残りの全員にブロードキャスト
        let count = self.registry.count().await;
        if let Err(e) = self
            .message_pusher
            .broadcast_all(&ServerEvent::UsersCount { count })
            .await
        {
            tracing::warn!("Failed to broadcast presence count: {}", e);
        }

        count
    }
}
