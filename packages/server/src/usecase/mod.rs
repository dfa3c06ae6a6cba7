//! UseCase layer: one struct per session-layer operation.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod ingest_video;
pub mod list_history;
pub mod relay_control;
pub mod send_message;
pub mod sync_playback;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{HistoryError, IngestError};
pub use ingest_video::IngestVideoUseCase;
pub use list_history::{ListMessagesUseCase, ListVideosUseCase};
pub use relay_control::RelayControlUseCase;
pub use send_message::SendMessageUseCase;
pub use sync_playback::SyncPlaybackUseCase;
