//! Server execution logic.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, IngestVideoUseCase,
    ListMessagesUseCase, ListVideosUseCase, RelayControlUseCase, SendMessageUseCase,
    SyncPlaybackUseCase,
};

use super::{
    handler::{
        get_messages, get_videos, health_check, post_message, upload_video, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// multipart のフレーミング分として body limit に上乗せする余裕
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Watch-together session server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     send_message_usecase,
///     relay_control_usecase,
///     sync_playback_usecase,
///     ingest_video_usecase,
///     list_messages_usecase,
///     list_videos_usecase,
///     upload_dir,
///     max_upload_size,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// RelayControlUseCase（再生制御イベント中継のユースケース）
    relay_control_usecase: Arc<RelayControlUseCase>,
    /// SyncPlaybackUseCase（再生状態同期のユースケース）
    sync_playback_usecase: Arc<SyncPlaybackUseCase>,
    /// IngestVideoUseCase（動画アップロード受け入れのユースケース）
    ingest_video_usecase: Arc<IngestVideoUseCase>,
    /// ListMessagesUseCase（メッセージ履歴取得のユースケース）
    list_messages_usecase: Arc<ListMessagesUseCase>,
    /// ListVideosUseCase（動画一覧取得のユースケース）
    list_videos_usecase: Arc<ListVideosUseCase>,
    /// アップロード済み動画の配信元ディレクトリ
    upload_dir: PathBuf,
    /// アップロードサイズの上限（バイト）
    max_upload_size: u64,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        relay_control_usecase: Arc<RelayControlUseCase>,
        sync_playback_usecase: Arc<SyncPlaybackUseCase>,
        ingest_video_usecase: Arc<IngestVideoUseCase>,
        list_messages_usecase: Arc<ListMessagesUseCase>,
        list_videos_usecase: Arc<ListVideosUseCase>,
        upload_dir: PathBuf,
        max_upload_size: u64,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            send_message_usecase,
            relay_control_usecase,
            sync_playback_usecase,
            ingest_video_usecase,
            list_messages_usecase,
            list_videos_usecase,
            upload_dir,
            max_upload_size,
        }
    }

    /// Run the watch-together session server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let body_limit = (self.max_upload_size + MULTIPART_OVERHEAD) as usize;

        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            send_message_usecase: self.send_message_usecase,
            relay_control_usecase: self.relay_control_usecase,
            sync_playback_usecase: self.sync_playback_usecase,
            ingest_video_usecase: self.ingest_video_usecase,
            list_messages_usecase: self.list_messages_usecase,
            list_videos_usecase: self.list_videos_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/messages", get(get_messages).post(post_message))
            .route("/api/videos", get(get_videos))
            .route("/api/upload", post(upload_video))
            // アップロード済み動画の静的配信
            .nest_service("/uploads", ServeDir::new(self.upload_dir))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Watch-together session server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
