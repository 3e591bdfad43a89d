//! Game identifiers and records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field set of a single upstream game or vote entry
pub type Fields = Map<String, Value>;

/// Roblox place identifier (input token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub u64);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Roblox universe identifier, resolved from a place identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniverseId(pub u64);

impl fmt::Display for UniverseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of resolving one place identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub place_id: PlaceId,
    pub universe_id: Option<UniverseId>,
    /// Why resolution failed, `None` on success
    pub failure: Option<String>,
}

impl ResolutionOutcome {
    pub fn resolved(place_id: PlaceId, universe_id: UniverseId) -> Self {
        Self {
            place_id,
            universe_id: Some(universe_id),
            failure: None,
        }
    }

    pub fn failed(place_id: PlaceId, reason: impl Into<String>) -> Self {
        Self {
            place_id,
            universe_id: None,
            failure: Some(reason.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.universe_id.is_some()
    }
}

/// Game metadata entry from the bulk games endpoint
pub type GameRecord = Fields;

/// Vote entry from the bulk votes endpoint
pub type VoteRecord = Fields;

/// Game fields merged with the matching vote fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JoinedGameRecord {
    pub fields: Fields,
}

impl JoinedGameRecord {
    /// Universe id carried in the `id` field, when present
    pub fn universe_id(&self) -> Option<UniverseId> {
        self.fields.get("id").and_then(Value::as_u64).map(UniverseId)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Ordered joined records produced by one pipeline run
pub type ResultSet = Vec<JoinedGameRecord>;
