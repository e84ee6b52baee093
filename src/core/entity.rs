//! Layer 4: The Entity
//!
//! Aggregate root: exclusively owns its version and transition sequences.
//! All mutation goes through methods that keep the invariants:
//!
//! - `current_state` equals the last transition's `to_state` (or draft)
//! - version numbers are contiguous from 1
//! - each transition's `from_state` chains to the previous `to_state`

use serde::{Deserialize, Serialize};

use super::domain::EntityState;
use super::error::CoreError;
use super::history::{Transition, Version};
use super::identity::{ActorId, EntityId};
use super::time::Timestamp;

/// The tracked business object (document, contract, invoice, ...).
///
/// `kind` is free text conventionally drawn from a fixed palette; it is not
/// a closed set. Serialized as `type` to match the durable format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub current_state: EntityState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub versions: Vec<Version>,
    pub transitions: Vec<Transition>,
}

impl Entity {
    /// Create a new entity in draft with its initial version.
    pub fn create(
        id: EntityId,
        name: String,
        kind: String,
        content: String,
        author: ActorId,
        at: Timestamp,
    ) -> Result<Self, CoreError> {
        CoreError::require_non_empty("name", &name)?;
        CoreError::require_non_empty("type", &kind)?;
        CoreError::require_non_empty("content", &content)?;
        Ok(Self {
            id,
            name,
            kind,
            current_state: EntityState::Draft,
            created_at: at,
            updated_at: at,
            versions: vec![Version::new(1, content, author, at)],
            transitions: Vec::new(),
        })
    }

    /// Apply a state change after validating it against the transition
    /// table. Either everything changes (state, audit log, `updated_at`)
    /// or nothing does.
    pub fn apply_transition(
        &mut self,
        target: EntityState,
        author: ActorId,
        reason: Option<String>,
        at: Timestamp,
    ) -> Result<&Transition, CoreError> {
        self.current_state.check_transition(target)?;
        let seq = self.transitions.len() as u32 + 1;
        self.transitions.push(Transition::new(
            seq,
            self.current_state,
            target,
            author,
            reason,
            at,
        ));
        self.current_state = target;
        self.updated_at = at;
        Ok(self.transitions.last().unwrap_or_else(|| unreachable!()))
    }

    /// Append a new content snapshot with the next contiguous number.
    pub fn revise(
        &mut self,
        content: String,
        author: ActorId,
        at: Timestamp,
    ) -> Result<&Version, CoreError> {
        CoreError::require_non_empty("content", &content)?;
        let number = self.versions.len() as u32 + 1;
        self.versions.push(Version::new(number, content, author, at));
        self.updated_at = at;
        Ok(self.versions.last().unwrap_or_else(|| unreachable!()))
    }

    /// Partial metadata edit. Does not touch state, versions or transitions.
    pub fn update_metadata(
        &mut self,
        name: Option<String>,
        kind: Option<String>,
        at: Timestamp,
    ) -> Result<(), CoreError> {
        if let Some(name) = &name {
            CoreError::require_non_empty("name", name)?;
        }
        if let Some(kind) = &kind {
            CoreError::require_non_empty("type", kind)?;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(kind) = kind {
            self.kind = kind;
        }
        self.updated_at = at;
        Ok(())
    }

    /// Latest content snapshot. Non-empty by construction.
    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.last()
    }

    pub fn last_transition(&self) -> Option<&Transition> {
        self.transitions.last()
    }

    /// Check the structural invariants. Used on rehydration and in tests;
    /// a live entity can only violate them if the durable slot was edited
    /// by hand.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        let derived = self
            .last_transition()
            .map(|t| t.to_state)
            .unwrap_or(EntityState::Draft);
        if self.current_state != derived {
            return Err(CoreError::Validation {
                field: "currentState",
            });
        }
        if self.versions.is_empty() {
            return Err(CoreError::Validation { field: "versions" });
        }
        for (i, v) in self.versions.iter().enumerate() {
            if v.number != i as u32 + 1 {
                return Err(CoreError::Validation { field: "versions" });
            }
        }
        let mut prev = EntityState::Draft;
        for t in &self.transitions {
            if t.from_state != prev {
                return Err(CoreError::Validation {
                    field: "transitions",
                });
            }
            prev = t.to_state;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> ActorId {
        ActorId::new("Alice").unwrap()
    }

    fn sample() -> Entity {
        Entity::create(
            EntityId::generate(),
            "Contrat Q1".into(),
            "Contrat".into(),
            "texte initial".into(),
            alice(),
            Timestamp::from_unix_ms(1_000),
        )
        .unwrap()
    }

    #[test]
    fn create_starts_in_draft_with_one_version() {
        let e = sample();
        assert_eq!(e.current_state, EntityState::Draft);
        assert_eq!(e.versions.len(), 1);
        assert_eq!(e.versions[0].number, 1);
        assert_eq!(e.versions[0].content, "texte initial");
        assert_eq!(e.versions[0].author.as_str(), "Alice");
        assert!(e.transitions.is_empty());
        assert_eq!(e.created_at, e.updated_at);
        e.check_invariants().unwrap();
    }

    #[test]
    fn create_rejects_blank_fields() {
        let err = Entity::create(
            EntityId::generate(),
            "  ".into(),
            "Contrat".into(),
            "texte".into(),
            alice(),
            Timestamp::from_unix_ms(0),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "name" }));
    }

    #[test]
    fn transition_appends_audit_record() {
        let mut e = sample();
        let before = e.updated_at;
        e.apply_transition(
            EntityState::Submitted,
            alice(),
            None,
            Timestamp::from_unix_ms(2_000),
        )
        .unwrap();
        assert_eq!(e.current_state, EntityState::Submitted);
        assert_eq!(e.transitions.len(), 1);
        let t = &e.transitions[0];
        assert_eq!(t.from_state, EntityState::Draft);
        assert_eq!(t.to_state, EntityState::Submitted);
        assert!(e.updated_at > before);
        e.check_invariants().unwrap();
    }

    #[test]
    fn illegal_transition_changes_nothing() {
        let mut e = sample();
        let snapshot = e.clone();
        let err = e
            .apply_transition(
                EntityState::Archived,
                alice(),
                None,
                Timestamp::from_unix_ms(2_000),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(e, snapshot);
    }

    #[test]
    fn rejection_resubmission_cycle_chains() {
        let mut e = sample();
        let bob = ActorId::new("Bob").unwrap();
        let mut at = 2_000;
        let mut step = |e: &mut Entity, to, author: &ActorId, reason: Option<&str>| {
            at += 1_000;
            e.apply_transition(
                to,
                author.clone(),
                reason.map(String::from),
                Timestamp::from_unix_ms(at),
            )
            .unwrap();
        };
        step(&mut e, EntityState::Submitted, &alice(), None);
        step(&mut e, EntityState::Rejected, &bob, Some("Documents incomplets"));
        step(&mut e, EntityState::Draft, &alice(), None);
        step(&mut e, EntityState::Submitted, &alice(), None);
        step(&mut e, EntityState::Validated, &bob, None);
        step(&mut e, EntityState::Archived, &bob, None);

        assert_eq!(e.current_state, EntityState::Archived);
        assert_eq!(e.transitions[1].reason.as_deref(), Some("Documents incomplets"));
        e.check_invariants().unwrap();

        // Terminal: nothing leaves archived.
        assert!(
            e.apply_transition(
                EntityState::Draft,
                alice(),
                None,
                Timestamp::from_unix_ms(99_000)
            )
            .is_err()
        );
    }

    #[test]
    fn revise_numbers_are_contiguous() {
        let mut e = sample();
        e.revise("v2".into(), alice(), Timestamp::from_unix_ms(2_000))
            .unwrap();
        e.revise("v3".into(), alice(), Timestamp::from_unix_ms(3_000))
            .unwrap();
        assert_eq!(
            e.versions.iter().map(|v| v.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(e.latest_version().unwrap().content, "v3");
        e.check_invariants().unwrap();
    }

    #[test]
    fn update_metadata_leaves_history_alone() {
        let mut e = sample();
        e.update_metadata(
            Some("Contrat Q2".into()),
            None,
            Timestamp::from_unix_ms(2_000),
        )
        .unwrap();
        assert_eq!(e.name, "Contrat Q2");
        assert_eq!(e.kind, "Contrat");
        assert_eq!(e.current_state, EntityState::Draft);
        assert_eq!(e.versions.len(), 1);
        assert!(e.transitions.is_empty());
    }

    #[test]
    fn check_invariants_catches_desync() {
        let mut e = sample();
        e.current_state = EntityState::Validated;
        assert!(e.check_invariants().is_err());
    }
}
