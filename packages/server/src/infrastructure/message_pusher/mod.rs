//! Broadcast Engine の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket の送信チャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
