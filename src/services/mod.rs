//! Service layer orchestrating the engine, identity, and persistence.

/// Authoritative game orchestrator driven by trigger events.
pub mod game_service;
/// Anonymous identity issuance.
pub mod identity;
/// Continuous pointer motion playback.
pub mod rotation;
/// Local/remote high-score reconciliation.
pub mod score_sync;
