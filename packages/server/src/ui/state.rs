//! Server state and connection management.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, IngestVideoUseCase,
    ListMessagesUseCase, ListVideosUseCase, RelayControlUseCase, SendMessageUseCase,
    SyncPlaybackUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// RelayControlUseCase（再生制御イベント中継のユースケース）
    pub relay_control_usecase: Arc<RelayControlUseCase>,
    /// SyncPlaybackUseCase（再生状態同期のユースケース）
    pub sync_playback_usecase: Arc<SyncPlaybackUseCase>,
    /// IngestVideoUseCase（動画アップロード受け入れのユースケース）
    pub ingest_video_usecase: Arc<IngestVideoUseCase>,
    /// ListMessagesUseCase（メッセージ履歴取得のユースケース）
    pub list_messages_usecase: Arc<ListMessagesUseCase>,
    /// ListVideosUseCase（動画一覧取得のユースケース）
    pub list_videos_usecase: Arc<ListVideosUseCase>,
}
