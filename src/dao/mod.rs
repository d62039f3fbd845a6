//! Persistence layer for player records.

/// Database model definitions.
pub mod models;
/// Player record storage and retrieval operations.
pub mod player_store;
/// Storage abstraction layer for database operations.
pub mod storage;
