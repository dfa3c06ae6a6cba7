//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Query, State, multipart::Field},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    infrastructure::dto::http::{
        ErrorResponse, MessageDto, PostMessageRequest, UploadResponse, VideoDto,
    },
    ui::state::AppState,
    usecase::IngestError,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Query parameters for message history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// Get recent chat messages (oldest first)
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let messages = state
        .list_messages_usecase
        .execute(query.limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load message history: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    // Domain Model から DTO への変換
    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}

/// Post a chat message over HTTP
///
/// Equivalent to the `send-message` WebSocket event: the message is
/// persisted and broadcast to all connected participants.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PostMessageRequest>,
) -> (StatusCode, Json<MessageDto>) {
    let message = state
        .send_message_usecase
        .execute(body.username, body.content)
        .await;

    (StatusCode::CREATED, Json(MessageDto::from(message)))
}

/// Get uploaded videos (newest first)
pub async fn get_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VideoDto>>, ApiError> {
    let videos = state.list_videos_usecase.execute().await.map_err(|e| {
        tracing::error!("Failed to load video list: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(videos.into_iter().map(VideoDto::from).collect()))
}

/// Upload a video file (multipart/form-data)
///
/// Expects an optional `username` text field followed by a `video` file
/// field. The file is streamed to storage as it arrives; fields after
/// the file are ignored.
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut username = String::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })? {
        match field.name() {
            Some("username") => {
                username = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
            }
            Some("video") => {
                let video = ingest_field(&state, field, username).await?;
                return Ok(Json(UploadResponse {
                    success: true,
                    video: VideoDto::from(video),
                }));
            }
            _ => {
                // 知らないフィールドは読み捨てる
            }
        }
    }

    Err(ingest_error_response(IngestError::NoFile))
}

/// 動画フィールドを Upload Intake Pipeline に流し込む
async fn ingest_field(
    state: &Arc<AppState>,
    field: Field<'_>,
    username: String,
) -> Result<crate::domain::VideoAsset, ApiError> {
    let original_filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();

    // Field をチャンクストリームに変換して、バイナリ全体をメモリに
    // 溜め込まずにストレージへ流す
    let body = Box::pin(futures_util::stream::unfold(field, |mut field| async {
        match field.chunk().await {
            Ok(Some(chunk)) => Some((Ok(chunk), field)),
            Ok(None) => None,
            Err(e) => Some((Err(e), field)),
        }
    }));

    state
        .ingest_video_usecase
        .execute(body, &original_filename, &content_type, username)
        .await
        .map_err(ingest_error_response)
}

/// IngestError を HTTP ステータスとエラーレスポンスに写像する
fn ingest_error_response(e: IngestError) -> ApiError {
    let status = match &e {
        IngestError::NoFile | IngestError::BodyRead(_) => StatusCode::BAD_REQUEST,
        IngestError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        IngestError::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        IngestError::Storage(_) | IngestError::Persistence(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        tracing::error!("Upload failed: {}", e);
    } else {
        tracing::warn!("Upload rejected: {}", e);
    }
    api_error(status, e.to_string())
}
