//! UI layer handlers (WebSocket / HTTP API).

mod http;
mod websocket;

pub use http::{get_messages, get_videos, health_check, post_message, upload_video};
pub use websocket::websocket_handler;
