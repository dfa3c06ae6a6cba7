//! Broadcast Engine trait 定義
//!
//! 接続中の参加者へのイベント配送のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。
//!
//! ## 配送保証
//!
//! 配送はベストエフォート。fan-out の途中で切断した参加者には届かず、
//! 送信者にエラーは返らない。後から接続した参加者への再送も行わない
//! （履歴は永続化コラボレータの list 系 API から取得する）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::event::ServerEvent;
use super::value_object::ClientId;

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Broadcast Engine trait
///
/// 受信したイベントを適切な対象（全員、送信者以外、特定の 1 人）に
/// fan-out する。同種のイベントは呼び出し順に配送される。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ClientId);

    /// 接続中の全参加者（送信者を含む）にイベントを配送
    async fn broadcast_all(&self, event: &ServerEvent) -> Result<(), MessagePushError>;

    /// `exclude` 以外の全参加者にイベントを配送
    async fn broadcast_others(
        &self,
        exclude: &ClientId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 特定の 1 人の参加者にイベントを配送
    async fn push_to(
        &self,
        client_id: &ClientId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;
}
