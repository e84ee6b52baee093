//! Layer 1: Identity atoms
//!
//! EntityId: tracked-object identifier with `ent-` prefix.
//! ActorId: who performed a mutation (attribution only, no auth).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidId};

/// Actor identifier - non-empty string.
///
/// Callers name themselves (the credential layer is an external
/// collaborator). No validation beyond non-empty after trimming.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(InvalidId::Actor {
                raw: s,
                reason: "empty".into(),
            }
            .into())
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({:?})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity identifier - `ent-{suffix}` format.
///
/// Suffix is 1+ lowercase alphanumeric characters. Freshly generated IDs
/// use a 12-char hex suffix; the parser accepts the superset so seeded and
/// externally imported IDs (`ent-1`) remain valid.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Parse and validate an entity ID string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let Some(suffix) = s.strip_prefix("ent-") else {
            return Err(InvalidId::Entity {
                raw: s.to_string(),
                reason: "must start with 'ent-'".into(),
            }
            .into());
        };
        if suffix.is_empty() {
            return Err(InvalidId::Entity {
                raw: s.to_string(),
                reason: "empty suffix".into(),
            }
            .into());
        }
        if !suffix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(InvalidId::Entity {
                raw: s.to_string(),
                reason: "suffix must be lowercase alphanumeric".into(),
            }
            .into());
        }
        Ok(Self(s.to_string()))
    }

    /// Generate a fresh random ID.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let hex = uuid.simple().to_string();
        Self(format!("ent-{}", &hex[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({:?})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_parse_valid() {
        let id = EntityId::parse("ent-1").unwrap();
        assert_eq!(id.as_str(), "ent-1");

        let id = EntityId::parse("ent-9f2c01ab34de").unwrap();
        assert_eq!(id.as_str(), "ent-9f2c01ab34de");
    }

    #[test]
    fn entity_id_rejects_bad_prefix() {
        assert!(EntityId::parse("1").is_err());
        assert!(EntityId::parse("bd-1").is_err());
        assert!(EntityId::parse("ent-").is_err());
    }

    #[test]
    fn entity_id_rejects_bad_chars() {
        assert!(EntityId::parse("ent-ABC").is_err());
        assert!(EntityId::parse("ent-a b").is_err());
    }

    #[test]
    fn entity_id_generate_is_parseable() {
        let id = EntityId::generate();
        assert!(EntityId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn actor_id_rejects_blank() {
        assert!(ActorId::new("").is_err());
        assert!(ActorId::new("   ").is_err());
        assert!(ActorId::new("Alice").is_ok());
    }
}
