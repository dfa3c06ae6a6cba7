//! HTTP API の DTO 定義

use serde::{Deserialize, Serialize};

/// POST /api/messages のリクエストボディ
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub content: String,
}

/// チャットメッセージのレスポンス表現
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: Option<i64>,
    pub username: String,
    pub content: String,
    pub created_at: i64,
}

/// 動画アセットのレスポンス表現
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDto {
    pub filename: String,
    #[serde(rename = "originalname")]
    pub original_name: String,
    pub url: String,
    pub uploader: String,
    pub size: u64,
    pub uploaded_at: i64,
}

/// POST /api/upload の成功レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub video: VideoDto,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
