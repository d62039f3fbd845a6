//! Library crate for pop-the-rock, exposing the game engine, score sync,
//! and storage layers for the binary and integration tests.

/// Runtime configuration loading.
pub mod config;
/// Persistence layer for player records.
pub mod dao;
/// Data exposed across the rendering boundary.
pub mod dto;
/// Score synchronization failure taxonomy.
pub mod error;
/// Service layer orchestrating the engine.
pub mod services;
/// Session state and the game rules.
pub mod state;
