//! Shared utilities for the kotatsu watch-together server.
//!
//! This crate holds the pieces that are useful to every layer of the
//! server: logging setup and time handling with a clock abstraction.

pub mod logger;
pub mod time;
