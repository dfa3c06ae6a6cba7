//! Entity 定義
//!
//! セッション層のエンティティ。`Participant` は接続ごとの一時的な
//! エンティティで、`ChatMessage` / `VideoAsset` は永続化される
//! 不変レコード。

use serde::{Deserialize, Serialize};

use super::value_object::{ClientId, MessageBody, Timestamp, Username};

/// セッション参加者
///
/// ライブ接続 1 つにつき 1 つ存在する。Session Registry が所有し、
/// 接続時に作成、切断時に破棄される。永続化されない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// 接続ごとに一意なクライアント ID
    pub id: ClientId,
    /// 接続時刻
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ClientId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

/// チャットメッセージ
///
/// `id` は永続化層が採番する単調増加のシーケンス ID。
/// 永続化層が利用不能でメモリのみの配送になった場合は `None` になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// シーケンス ID（永続化層が採番。未永続化なら None）
    pub id: Option<i64>,
    /// 送信者の表示名
    pub username: Username,
    /// メッセージ本文
    pub content: MessageBody,
    /// 送信時刻
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: Option<i64>,
        username: Username,
        content: MessageBody,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            content,
            created_at,
        }
    }
}

/// アップロードされた動画アセット
///
/// Upload Intake Pipeline が作成し、以降は不変。永続化される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAsset {
    /// ストレージ上のファイル名（アップロード時に生成、一意）
    pub filename: String,
    /// アップロード元のファイル名（ユーザー入力、信頼しない）
    pub original_name: String,
    /// アップロードしたユーザーの表示名
    pub uploader: Username,
    /// ファイルサイズ（バイト）
    pub size: u64,
    /// クライアントが解決できるコンテンツ URL
    pub url: String,
    /// アップロード時刻
    pub uploaded_at: Timestamp,
}

/// 再生状態
///
/// サーバ側に正となるコピーは存在しない。`request-sync` への応答として
/// 既定値（先頭・一時停止）を返すためだけに使う。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// 再生位置（秒、非負）
    pub time_secs: f64,
    /// 再生中フラグ
    pub playing: bool,
}

impl PlaybackState {
    /// 新しい PlaybackState を作成（負の再生位置は 0 に丸める）
    pub fn new(time_secs: f64, playing: bool) -> Self {
        Self {
            time_secs: time_secs.max(0.0),
            playing,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            time_secs: 0.0,
            playing: false,
        }
    }
}
