//! Domain layer for the watch-together session server.
//!
//! This module contains business logic that is independent of
//! data transfer concerns and infrastructure details.

pub mod entity;
pub mod error;
pub mod event;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod storage;
pub mod value_object;

pub use entity::{ChatMessage, Participant, PlaybackState, VideoAsset};
pub use error::{MessagePushError, StorageError, StoreError, ValueObjectError};
pub use event::{ClientEvent, ServerEvent};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::SessionRegistry;
pub use repository::{MessageStore, VideoStore};
pub use storage::{MediaSink, MediaStorage};
pub use value_object::{ClientId, MessageBody, Timestamp, Username};
