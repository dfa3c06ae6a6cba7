//! UseCase: 再生状態の同期応答処理
//!
//! `request-sync` に対して、要求者 1 人だけに `sync-video` を返します。
//!
//! サーバは正となる再生状態を保持しないため、応答は常に既定値
//! （先頭・一時停止）です。このプロトコルは同期の「輸送路」を提供する
//! だけで、どのピアの状態を信頼するかはクライアント側の判断に
//! 委ねられます。

use std::sync::Arc;

use crate::domain::{ClientId, MessagePusher, PlaybackState, ServerEvent};

/// 再生状態同期のユースケース
pub struct SyncPlaybackUseCase {
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SyncPlaybackUseCase {
    /// 新しい SyncPlaybackUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 同期応答を実行
    ///
    /// # Arguments
    ///
    /// * `requester` - 同期を要求したクライアントの ID
    ///
    /// # Returns
    ///
    /// 応答した再生状態（常に既定値）。
    pub async fn execute(&self, requester: &ClientId) -> PlaybackState {
        let state = PlaybackState::default();

        if let Err(e) = self
            .message_pusher
            .push_to(requester, &ServerEvent::from_playback_state(&state))
            .await
        {
            // 応答前に切断した要求者はエラーではない
            tracing::warn!("Failed to send sync response: {}", e);
        }

        state
    }
}
