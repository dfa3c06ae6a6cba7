//! Data Transfer Objects (DTOs) for the watch-together server.
//!
//! WebSocket events are typed directly as the domain's tagged
//! `ClientEvent` / `ServerEvent` enums; this module only carries the
//! HTTP API request/response shapes.

pub mod conversion;
pub mod http;
