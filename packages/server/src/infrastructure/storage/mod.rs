//! メディアストレージの実装

pub mod local;

pub use local::LocalMediaStorage;
