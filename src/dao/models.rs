//! Entities shared between the storage layer and the services.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One player's remote record, keyed by their anonymous identity.
///
/// Created lazily on first bootstrap; the client only ever writes its own
/// record. `high_score` is the personal best and is expected to be
/// monotonically non-decreasing over the lifetime of the identity, though
/// the store itself does not enforce that (last writer wins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Anonymous identity owning the record.
    pub id: Uuid,
    /// Display name, `"guest"` until renamed. May be empty.
    pub name: String,
    /// Highest streak ever persisted for this identity.
    pub high_score: u32,
}

impl PlayerEntity {
    /// Fresh record for a first-time identity.
    pub fn guest(id: Uuid) -> Self {
        Self {
            id,
            name: "guest".to_string(),
            high_score: 0,
        }
    }
}
