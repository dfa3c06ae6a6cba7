//! UseCase: 参加者接続処理
//!
//! 新しいライブ接続を Session Registry に登録し、Broadcast Engine に
//! 送信チャンネルを登録したうえで、更新後の在席数を（接続したばかりの
//! 参加者も含む）全員にブロードキャストします。登録は失敗しません。

use std::sync::Arc;

use kotatsu_shared::time::Clock;

use crate::domain::{
    ClientId, MessagePusher, Participant, PusherChannel, ServerEvent, SessionRegistry, Timestamp,
};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Session Registry（参加者集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `client_id` - 接続するクライアントの ID（サーバ側で生成済み）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 接続時刻。登録は失敗しないため Result ではない。
    pub async fn execute(&self, client_id: ClientId, sender: PusherChannel) -> Timestamp {
        let joined_at = Timestamp::new(self.clock.now_unix_millis());

        // 1. Session Registry に参加者を追加
        self.registry
            .add(Participant::new(client_id.clone(), joined_at))
            .await;

        // 2. Broadcast Engine にチャンネルを登録
        //    （在席数ブロードキャストが本人にも届くよう、必ず先に登録する）
        self.message_pusher.register_client(client_id, sender).await;

        // 3. 更新後の在席数を全員にブロードキャスト
        let count = self.registry.count().await;
        if let Err(e) = self
            .message_pusher
            .broadcast_all(&ServerEvent::UsersCount { count })
            .await
        {
            tracing::warn!("Failed to broadcast presence count: {}", e);
        }

        joined_at
    }
}
