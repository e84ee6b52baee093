//! Durable slot I/O.
//!
//! The slot is a single JSON file holding the whole collection, rewritten
//! on every mutation (no delta log). Writes go through a temp file + rename
//! so a crash mid-write never leaves a truncated slot behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::Entity;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to read slot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("slot {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to write slot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the slot. `Ok(None)` when no slot exists yet.
///
/// A slot that exists but fails to parse, or whose entities violate the
/// structural invariants, reports `Malformed`; the store recovers from
/// that by reseeding, it never propagates to callers.
pub fn load(path: &Path) -> Result<Option<Vec<Entity>>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let entities: Vec<Entity> =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    for entity in &entities {
        entity
            .check_invariants()
            .map_err(|e| StoreError::Malformed {
                path: path.to_path_buf(),
                reason: format!("entity {}: {e}", entity.id),
            })?;
    }

    Ok(Some(entities))
}

/// Rewrite the slot with the full collection.
pub fn save(path: &Path, entities: &[Entity]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    // Infallible: Entity serialization has no non-string map keys.
    let json = serde_json::to_vec_pretty(entities).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActorId, EntityId, Timestamp};

    fn sample() -> Entity {
        Entity::create(
            EntityId::generate(),
            "Facture 1001".into(),
            "Facture".into(),
            "montant: 1200 EUR".into(),
            ActorId::new("Claire Dupont").unwrap(),
            Timestamp::from_unix_ms(1_700_000_000_000),
        )
        .unwrap()
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.json");
        let entities = vec![sample(), sample()];

        save(&path, &entities).unwrap();
        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded, entities);
    }

    #[test]
    fn load_missing_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.json");
        fs::write(&path, b"{not json!").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn load_rejects_invariant_violations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.json");
        let mut entity = sample();
        entity.versions.clear(); // hand-edited slot
        save(&path, &[entity]).unwrap();
        assert!(matches!(load(&path), Err(StoreError::Malformed { .. })));
    }
}
