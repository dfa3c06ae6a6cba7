//! Watch-together session server.
//!
//! Serves a shared viewing session: synchronized playback relay, live chat
//! with history, and streaming video upload with broadcast announcements.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kotatsu-server
//! cargo run --bin kotatsu-server -- --host 0.0.0.0 --port 3000
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use kotatsu_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemorySessionRegistry,
        repository::SqliteStore, storage::LocalMediaStorage,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, IngestVideoUseCase,
        ListMessagesUseCase, ListVideosUseCase, RelayControlUseCase, SendMessageUseCase,
        SyncPlaybackUseCase,
    },
};
use kotatsu_shared::{logger::setup_logger, time::SystemClock};

/// 既定のアップロードサイズ上限（500 MiB）
const DEFAULT_MAX_UPLOAD_SIZE: u64 = 500 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "kotatsu-server")]
#[command(about = "Watch-together session server with synchronized playback and chat", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// SQLite database URL for chat history and video metadata
    #[arg(long, default_value = "sqlite://kotatsu.db?mode=rwc")]
    database_url: String,

    /// Maximum number of database connections in the pool
    #[arg(long, default_value = "5")]
    database_pool_size: u32,

    /// Directory where uploaded videos are stored and served from
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Maximum upload size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_SIZE)]
    max_upload_size: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Store (SQLite) and MediaStorage (local disk)
    // 2. SessionRegistry and MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Store (lazy connection: a missing database must not
    //    prevent startup, chat degrades to in-memory delivery)
    let store = match SqliteStore::connect_lazy(&args.database_url, args.database_pool_size) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Invalid database URL '{}': {}", args.database_url, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = store.init_schema().await {
        tracing::warn!(
            "Could not initialize database schema, persistence is degraded: {}",
            e
        );
    }

    let media_storage = Arc::new(LocalMediaStorage::new(args.upload_dir.clone()));
    if let Err(e) = media_storage.init().await {
        tracing::error!(
            "Failed to create upload directory '{}': {}",
            args.upload_dir.display(),
            e
        );
        std::process::exit(1);
    }

    // 2. Create SessionRegistry and MessagePusher
    let registry = Arc::new(InMemorySessionRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        store.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let relay_control_usecase = Arc::new(RelayControlUseCase::new(message_pusher.clone()));
    let sync_playback_usecase = Arc::new(SyncPlaybackUseCase::new(message_pusher.clone()));
    let ingest_video_usecase = Arc::new(IngestVideoUseCase::new(
        media_storage.clone(),
        store.clone(),
        message_pusher.clone(),
        clock.clone(),
        args.max_upload_size,
    ));
    let list_messages_usecase = Arc::new(ListMessagesUseCase::new(store.clone()));
    let list_videos_usecase = Arc::new(ListVideosUseCase::new(store.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        relay_control_usecase,
        sync_playback_usecase,
        ingest_video_usecase,
        list_messages_usecase,
        list_videos_usecase,
        args.upload_dir,
        args.max_upload_size,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
