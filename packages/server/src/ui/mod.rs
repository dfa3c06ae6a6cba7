//! Watch-together session server implementation.

mod handler;
mod server;
mod signal;
pub mod state; // UseCase 層や bin からアクセスするため public

pub use server::Server;
