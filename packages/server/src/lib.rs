//! Watch-together session server library.
//!
//! Lets a small group of users co-watch an uploaded video while exchanging
//! text chat. Chat messages, playback-control events and presence updates
//! are fanned out in real time to every connected participant over
//! WebSocket; chat history and video metadata are recorded durably.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
