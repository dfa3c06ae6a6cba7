//! 永続化コラボレータの実装

pub mod sqlite;

pub use sqlite::SqliteStore;
