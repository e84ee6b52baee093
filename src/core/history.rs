//! Layer 3: Immutable history records
//!
//! Version: a content snapshot, numbered contiguously from 1.
//! Transition: one audit entry of a state change.
//!
//! Once created, neither is ever edited or removed; the entity appends only.

use serde::{Deserialize, Serialize};

use super::domain::EntityState;
use super::identity::ActorId;
use super::time::Timestamp;

/// Immutable content snapshot.
///
/// `number` is 1-based and contiguous within one entity; the highest number
/// is always the most recently created version. Serialized as `version` to
/// match the durable format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(rename = "version")]
    pub number: u32,
    pub content: String,
    pub created_at: Timestamp,
    pub author: ActorId,
}

impl Version {
    pub fn new(number: u32, content: String, author: ActorId, at: Timestamp) -> Self {
        Self {
            id: format!("ver-{number}"),
            number,
            content,
            created_at: at,
            author,
        }
    }
}

/// Immutable audit record of one state change.
///
/// `reason` is free text; policy asks for one when `to_state` is rejected,
/// enforced by the form layer rather than here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub id: String,
    pub from_state: EntityState,
    pub to_state: EntityState,
    pub timestamp: Timestamp,
    pub author: ActorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Transition {
    pub fn new(
        seq: u32,
        from_state: EntityState,
        to_state: EntityState,
        author: ActorId,
        reason: Option<String>,
        at: Timestamp,
    ) -> Self {
        Self {
            id: format!("trans-{seq}"),
            from_state,
            to_state,
            timestamp: at,
            author,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_serializes_with_original_field_names() {
        let v = Version::new(
            1,
            "texte initial".into(),
            ActorId::new("Alice").unwrap(),
            Timestamp::from_unix_ms(0),
        );
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["id"], "ver-1");
        assert_eq!(json["version"], 1);
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn transition_omits_absent_reason() {
        let t = Transition::new(
            1,
            EntityState::Draft,
            EntityState::Submitted,
            ActorId::new("Alice").unwrap(),
            None,
            Timestamp::from_unix_ms(0),
        );
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["fromState"], "draft");
        assert_eq!(json["toState"], "submitted");
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn transition_keeps_reason_verbatim() {
        let t = Transition::new(
            2,
            EntityState::Submitted,
            EntityState::Rejected,
            ActorId::new("Bob").unwrap(),
            Some("Documents incomplets".into()),
            Timestamp::from_unix_ms(0),
        );
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["reason"], "Documents incomplets");
    }
}
