//! Infrastructure layer: concrete implementations of the domain traits
//! and data transfer objects.

pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod storage;
