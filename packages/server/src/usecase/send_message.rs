//! UseCase: チャットメッセージ送信処理
//!
//! メッセージを永続化コラボレータに保存（シーケンス ID の採番）した後、
//! 送信者を含む全員に `new-message` イベントをブロードキャストします。
//!
//! ## 縮退動作
//!
//! 永続化が失敗してもメッセージは破棄せず、ID なしのレコードとして
//! そのままブロードキャストします（メモリのみの配送）。永続化の失敗が
//! ディスパッチループを落としたり、他の参加者の接続を切ったりすることは
//! ありません。

use std::sync::Arc;

use kotatsu_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessageBody, MessagePusher, MessageStore, ServerEvent, Timestamp, Username,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessageStore（永続化コラボレータの抽象化）
    store: Arc<dyn MessageStore>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        store: Arc<dyn MessageStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `username` - 送信者の表示名（空なら "anonymous" になる）
    /// * `content` - メッセージ本文（そのまま受け入れる）
    ///
    /// # Returns
    ///
    /// ブロードキャストされたレコード。永続化に成功していればシーケンス
    /// ID を持ち、縮退時は `id` が `None` になる。
    pub async fn execute(&self, username: String, content: String) -> ChatMessage {
        let username = Username::new(username);
        let content = MessageBody::new(content);
        let created_at = Timestamp::new(self.clock.now_unix_millis());

        // 1. 永続化コラボレータに保存（失敗してもメモリのみで配送を続行）
        let message = match self
            .store
            .save_message(username.clone(), content.clone(), created_at)
            .await
        {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(
                    "Persistence unavailable, delivering message in memory only: {}",
                    e
                );
                ChatMessage::new(None, username, content, created_at)
            }
        };

        // 2. 送信者を含む全員にブロードキャスト
        if let Err(e) = self
            .message_pusher
            .broadcast_all(&ServerEvent::from_message(&message))
            .await
        {
            tracing::warn!("Failed to broadcast chat message: {}", e);
        }

        message
    }
}
