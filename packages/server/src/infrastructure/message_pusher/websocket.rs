//! WebSocket を使った Broadcast Engine 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - イベントの fan-out（broadcast_all / broadcast_others / push_to）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、イベント配送に
//! 使用します。
//!
//! イベントは 1 回だけシリアライズしてから fan-out します。sender マップの
//! ロック下で全チャンネルに enqueue するため、同種のイベントは呼び出し順に
//! 各クライアントへ届きます（チャンネルは FIFO）。個々のチャンネルへの
//! 送信失敗は警告ログに留め、呼び出し側にエラーを返しません
//! （ベストエフォート配送）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, MessagePushError, MessagePusher, PusherChannel, ServerEvent};

/// WebSocket を使った Broadcast Engine 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: client_id (String)
    /// Value: PusherChannel
    clients: Mutex<HashMap<String, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn serialize(event: &ServerEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(event).map_err(|e| MessagePushError::Serialize(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id.as_str().to_string(), sender);
        tracing::debug!("Client '{}' registered to MessagePusher", client_id.as_str());
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id.as_str());
        tracing::debug!(
            "Client '{}' unregistered from MessagePusher",
            client_id.as_str()
        );
    }

    async fn broadcast_all(&self, event: &ServerEvent) -> Result<(), MessagePushError> {
        let content = Self::serialize(event)?;
        let clients = self.clients.lock().await;

        for (id, sender) in clients.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push event to client '{}': {}", id, e);
            }
        }

        Ok(())
    }

    async fn broadcast_others(
        &self,
        exclude: &ClientId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::serialize(event)?;
        let clients = self.clients.lock().await;

        for (id, sender) in clients.iter() {
            if id == exclude.as_str() {
                continue;
            }
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push event to client '{}': {}", id, e);
            }
        }

        Ok(())
    }

    async fn push_to(
        &self,
        client_id: &ClientId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::serialize(event)?;
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(client_id.as_str()) {
            sender
                .send(content)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(
                client_id.as_str().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn register(pusher: &WebSocketMessagePusher, id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        pusher
            .register_client(ClientId::new(id.to_string()).unwrap(), tx)
            .await;
        rx
    }

    #[tokio::test]
    async fn test_broadcast_all_includes_sender() {
        // テスト項目: broadcast_all は送信者を含む全員に配送する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let mut rx_alice = register(&pusher, "alice").await;
        let mut rx_bob = register(&pusher, "bob").await;

        // when (操作):
        let event = ServerEvent::UsersCount { count: 2 };
        pusher.broadcast_all(&event).await.unwrap();

        // then (期待する結果): 両方のクライアントが受信する
        let msg_alice = rx_alice.recv().await.unwrap();
        let msg_bob = rx_bob.recv().await.unwrap();
        assert!(msg_alice.contains("users-count"));
        assert_eq!(msg_alice, msg_bob);
    }

    #[tokio::test]
    async fn test_broadcast_others_excludes_sender() {
        // テスト項目: broadcast_others は指定クライアントを除外する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let mut rx_alice = register(&pusher, "alice").await;
        let mut rx_bob = register(&pusher, "bob").await;
        let mut rx_charlie = register(&pusher, "charlie").await;

        // when (操作): alice を除外して配送
        let alice = ClientId::new("alice".to_string()).unwrap();
        let event = ServerEvent::VideoControl {
            payload: serde_json::json!({"action": "play"}),
        };
        pusher.broadcast_others(&alice, &event).await.unwrap();

        // then (期待する結果): bob と charlie のみ受信する
        assert!(rx_bob.recv().await.unwrap().contains("video-control"));
        assert!(rx_charlie.recv().await.unwrap().contains("video-control"));
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_single_recipient() {
        // テスト項目: push_to は指定した 1 人だけに配送する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let mut rx_alice = register(&pusher, "alice").await;
        let mut rx_bob = register(&pusher, "bob").await;

        // when (操作):
        let alice = ClientId::new("alice".to_string()).unwrap();
        let event = ServerEvent::SyncVideo {
            time: 0.0,
            playing: false,
        };
        pusher.push_to(&alice, &event).await.unwrap();

        // then (期待する結果): alice のみ受信する
        assert!(rx_alice.recv().await.unwrap().contains("sync-video"));
        assert!(rx_bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの push_to はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let ghost = ClientId::new("ghost".to_string()).unwrap();
        let event = ServerEvent::UsersCount { count: 0 };
        let result = pusher.push_to(&ghost, &event).await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            MessagePushError::ClientNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_channel() {
        // テスト項目: 受信側が閉じたチャンネルがあってもブロードキャストは成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let rx_alice = register(&pusher, "alice").await;
        let mut rx_bob = register(&pusher, "bob").await;
        drop(rx_alice); // alice が fan-out 中に切断した状況

        // when (操作):
        let event = ServerEvent::UsersCount { count: 2 };
        let result = pusher.broadcast_all(&event).await;

        // then (期待する結果): エラーにならず、bob には届く
        assert!(result.is_ok());
        assert!(rx_bob.recv().await.unwrap().contains("users-count"));
    }

    #[tokio::test]
    async fn test_broadcast_preserves_submission_order() {
        // テスト項目: 同種のイベントは送信順に配送される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let mut rx = register(&pusher, "alice").await;

        // when (操作): カウント 1..=5 を順に配送
        for count in 1..=5 {
            pusher
                .broadcast_all(&ServerEvent::UsersCount { count })
                .await
                .unwrap();
        }

        // then (期待する結果): 受信順が送信順と一致する
        for count in 1..=5 {
            let msg = rx.recv().await.unwrap();
            assert!(msg.contains(&format!("\"count\":{count}")));
        }
    }
}
