//! 永続化コラボレータの trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 永続化層はセッション層にとって不透明なコラボレータであり、
//! 追記のみの書き込みとタイムスタンプ順の読み出しだけを公開します。

use async_trait::async_trait;

use super::entity::{ChatMessage, VideoAsset};
use super::error::StoreError;
use super::value_object::{MessageBody, Timestamp, Username};

/// チャットメッセージの永続化ストア
///
/// `save_message` は単調増加のシーケンス ID を採番して返す。
/// 失敗してもセッション層は落ちず、メモリのみの配送に縮退する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを永続化し、採番済みのレコードを返す
    async fn save_message(
        &self,
        username: Username,
        content: MessageBody,
        created_at: Timestamp,
    ) -> Result<ChatMessage, StoreError>;

    /// 直近 `limit` 件のメッセージを時系列順（古い → 新しい）で返す
    async fn list_messages(&self, limit: u32) -> Result<Vec<ChatMessage>, StoreError>;
}

/// 動画メタデータの永続化ストア
///
/// アップロード通知は `save_video` の成功後にのみ行われる
/// （履歴エンドポイントが報告できないアセットを通知しないため）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// 動画メタデータを永続化する
    async fn save_video(&self, video: VideoAsset) -> Result<(), StoreError>;

    /// 永続化済みの全ての動画メタデータを新しい順で返す
    async fn list_videos(&self) -> Result<Vec<VideoAsset>, StoreError>;
}
