//! セッションイベント定義
//!
//! ## 概要
//!
//! WebSocket 上を流れる名前付きイベントを、閉じたタグ付き enum として
//! 定義します。文字列名による動的ディスパッチではなく、`type` タグ付きの
//! バリアントに対する match でルーティングします。
//!
//! ## ワイヤ形式
//!
//! `{"type": "send-message", ...}` のように、`type` フィールドで
//! イベント種別を表す JSON オブジェクト。

use serde::{Deserialize, Serialize};

use super::entity::{ChatMessage, PlaybackState, VideoAsset};

/// クライアント → サーバのイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// チャットメッセージ送信
    #[serde(rename = "send-message")]
    SendMessage {
        #[serde(default)]
        username: String,
        #[serde(default)]
        content: String,
    },
    /// 再生制御イベント（内容は不透明なペイロードとして中継する）
    #[serde(rename = "video-control")]
    VideoControl {
        #[serde(flatten)]
        payload: serde_json::Value,
    },
    /// 現在の再生状態の問い合わせ
    #[serde(rename = "request-sync")]
    RequestSync,
}

/// サーバ → クライアントのイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// 新着チャットメッセージ（全員に配送）
    #[serde(rename = "new-message")]
    NewMessage {
        id: Option<i64>,
        username: String,
        content: String,
        created_at: i64,
    },
    /// 再生制御イベントの中継（送信者以外の全員に配送）
    #[serde(rename = "video-control")]
    VideoControl {
        #[serde(flatten)]
        payload: serde_json::Value,
    },
    /// 再生状態の同期応答（要求者のみに配送）
    #[serde(rename = "sync-video")]
    SyncVideo { time: f64, playing: bool },
    /// 動画アップロード通知（全員に配送）
    #[serde(rename = "video-uploaded")]
    VideoUploaded {
        filename: String,
        #[serde(rename = "originalname")]
        original_name: String,
        url: String,
        uploader: String,
        size: u64,
        uploaded_at: i64,
    },
    /// 在席数の更新通知（全員に配送）
    #[serde(rename = "users-count")]
    UsersCount { count: usize },
}

impl ServerEvent {
    /// ChatMessage からの変換
    pub fn from_message(message: &ChatMessage) -> Self {
        Self::NewMessage {
            id: message.id,
            username: message.username.as_str().to_string(),
            content: message.content.as_str().to_string(),
            created_at: message.created_at.value(),
        }
    }

    /// VideoAsset からの変換
    pub fn from_video(video: &VideoAsset) -> Self {
        Self::VideoUploaded {
            filename: video.filename.clone(),
            original_name: video.original_name.clone(),
            url: video.url.clone(),
            uploader: video.uploader.as_str().to_string(),
            size: video.size,
            uploaded_at: video.uploaded_at.value(),
        }
    }

    /// PlaybackState からの変換
    pub fn from_playback_state(state: &PlaybackState) -> Self {
        Self::SyncVideo {
            time: state.time_secs,
            playing: state.playing,
        }
    }
}
