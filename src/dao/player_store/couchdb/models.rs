//! Document shapes stored in CouchDB.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::error::CouchDaoError;
use crate::dao::models::PlayerEntity;

pub const PLAYER_PREFIX: &str = "player::";
pub const END_SUFFIX: &str = "\u{ffff}";

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    #[allow(dead_code)]
    pub id: String,
    #[serde(default)]
    pub doc: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchPlayerDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub player: PlayerBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub name: String,
    pub high_score: u32,
}

impl From<(PlayerEntity, Option<String>)> for CouchPlayerDocument {
    fn from((player, rev): (PlayerEntity, Option<String>)) -> Self {
        Self {
            id: player_doc_id(player.id),
            rev,
            player: PlayerBody {
                name: player.name,
                high_score: player.high_score,
            },
        }
    }
}

impl TryFrom<CouchPlayerDocument> for PlayerEntity {
    type Error = CouchDaoError;

    fn try_from(doc: CouchPlayerDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: extract_uuid(&doc.id)?,
            name: doc.player.name,
            high_score: doc.player.high_score,
        })
    }
}

pub fn player_doc_id(id: Uuid) -> String {
    format!("{}{}", PLAYER_PREFIX, id)
}

pub fn extract_uuid(doc_id: &str) -> Result<Uuid, CouchDaoError> {
    let (_, id) = doc_id
        .split_once("::")
        .ok_or_else(|| CouchDaoError::InvalidDocId {
            doc_id: doc_id.to_string(),
            kind: "missing separator",
        })?;

    Uuid::parse_str(id).map_err(|_| CouchDaoError::InvalidDocId {
        doc_id: doc_id.to_string(),
        kind: "invalid UUID",
    })
}
