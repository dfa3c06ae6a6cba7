//! UseCase: 再生制御イベントの中継処理
//!
//! `video-control` イベント（play / pause / seek など）を、送信者以外の
//! 全員に中継します。発信元のクライアントはローカルのプレイヤ状態を
//! 既に持っており、自分のコマンドを再適用してはならないため、送信者は
//! 必ず除外します。
//!
//! ペイロードの内容は不透明なまま検証せずに中継します。

use std::sync::Arc;

use crate::domain::{ClientId, MessagePusher, ServerEvent};

/// 再生制御イベント中継のユースケース
pub struct RelayControlUseCase {
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayControlUseCase {
    /// 新しい RelayControlUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 再生制御イベントの中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 発信元クライアントの ID（配送から除外される）
    /// * `payload` - 中継する不透明なペイロード
    pub async fn execute(&self, sender: &ClientId, payload: serde_json::Value) {
        if let Err(e) = self
            .message_pusher
            .broadcast_others(sender, &ServerEvent::VideoControl { payload })
            .await
        {
            tracing::warn!("Failed to relay video-control event: {}", e);
        }
    }
}
