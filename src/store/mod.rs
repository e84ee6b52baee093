//! The Entity Store: single owner of the collection and its durable slot.
//!
//! All reads and writes go through the store. Operations are synchronous
//! and single-writer: one runs to completion before the next begins, and
//! every mutation rewrites the whole slot (read-once-at-startup,
//! write-on-every-mutation).

mod persist;
mod seed;
mod stats;

use std::path::{Path, PathBuf};

use crate::Result;
use crate::core::{ActorId, Clock, CoreError, Entity, EntityId, EntityState, Timestamp};

pub use persist::StoreError;
pub use stats::EntityStats;

/// Owner of the in-memory collection and its persistence lifecycle.
///
/// Construct once per process with [`EntityStore::open`] and pass by
/// reference to consumers; there is no ambient global.
pub struct EntityStore {
    slot: PathBuf,
    entities: Vec<Entity>,
    clock: Clock,
}

impl EntityStore {
    /// Open the store backed by the slot at `slot`.
    ///
    /// Missing slot: seed with the sample dataset and persist immediately.
    /// Malformed slot: fall back to the sample dataset without failing;
    /// startup corruption is recovered, never surfaced.
    pub fn open(slot: impl Into<PathBuf>) -> Result<Self> {
        let slot = slot.into();
        let mut clock = Clock::new();

        let entities = match persist::load(&slot) {
            Ok(Some(entities)) => {
                tracing::debug!(count = entities.len(), slot = %slot.display(), "slot loaded");
                for entity in &entities {
                    clock.observe(entity.updated_at);
                }
                entities
            }
            Ok(None) => {
                tracing::info!(slot = %slot.display(), "no slot found, seeding sample data");
                let entities = seed::sample_entities(&mut clock);
                persist::save(&slot, &entities)?;
                entities
            }
            Err(e) => {
                tracing::warn!(error = %e, "slot unreadable, falling back to sample data");
                let entities = seed::sample_entities(&mut clock);
                persist::save(&slot, &entities)?;
                entities
            }
        };

        Ok(Self {
            slot,
            entities,
            clock,
        })
    }

    /// Path of the durable slot.
    pub fn slot_path(&self) -> &Path {
        &self.slot
    }

    /// Create a new entity in draft with its initial version.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        content: impl Into<String>,
        author: ActorId,
    ) -> Result<&Entity> {
        let now = self.clock.tick();
        let entity = Entity::create(
            EntityId::generate(),
            name.into(),
            kind.into(),
            content.into(),
            author,
            now,
        )?;
        tracing::info!(id = %entity.id, name = %entity.name, "entity created");
        self.entities.push(entity);
        self.persist()?;
        Ok(self.entities.last().unwrap_or_else(|| unreachable!()))
    }

    /// Move an entity to `target`, appending the audit record.
    ///
    /// Refuses moves outside the transition table with `InvalidTransition`;
    /// the entity is untouched on refusal.
    pub fn transition(
        &mut self,
        id: &EntityId,
        target: EntityState,
        author: ActorId,
        reason: Option<String>,
    ) -> Result<&Entity> {
        let now = self.clock.tick();
        let idx = self.index_of(id)?;
        let entity = &mut self.entities[idx];
        let from = entity.current_state;
        entity.apply_transition(target, author, reason, now)?;
        tracing::info!(%id, %from, to = %target, "entity transitioned");
        self.persist()?;
        Ok(&self.entities[idx])
    }

    /// Append a new content version.
    pub fn revise(
        &mut self,
        id: &EntityId,
        content: impl Into<String>,
        author: ActorId,
    ) -> Result<&Entity> {
        let now = self.clock.tick();
        let idx = self.index_of(id)?;
        let version = self.entities[idx].revise(content.into(), author, now)?;
        tracing::info!(%id, version = version.number, "entity revised");
        self.persist()?;
        Ok(&self.entities[idx])
    }

    /// Partial metadata edit (name and/or type). History is untouched.
    pub fn update_metadata(
        &mut self,
        id: &EntityId,
        name: Option<String>,
        kind: Option<String>,
    ) -> Result<&Entity> {
        let now = self.clock.tick();
        let idx = self.index_of(id)?;
        self.entities[idx].update_metadata(name, kind, now)?;
        tracing::info!(%id, "entity metadata updated");
        self.persist()?;
        Ok(&self.entities[idx])
    }

    /// Permanently remove an entity and its owned history.
    pub fn delete(&mut self, id: &EntityId) -> Result<()> {
        let idx = self.index_of(id)?;
        self.entities.remove(idx);
        tracing::info!(%id, "entity deleted");
        self.persist()?;
        Ok(())
    }

    /// Pure lookup, no side effects.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    /// The collection in insertion order. Callers sort as needed
    /// (recent views sort by `updated_at` descending).
    pub fn list(&self) -> &[Entity] {
        &self.entities
    }

    /// Collection-level metrics as of now.
    pub fn stats(&self) -> EntityStats {
        EntityStats::compute(&self.entities, Timestamp::now())
    }

    fn index_of(&self, id: &EntityId) -> std::result::Result<usize, CoreError> {
        self.entities
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| CoreError::not_found(id.as_str()))
    }

    fn persist(&self) -> std::result::Result<(), StoreError> {
        persist::save(&self.slot, &self.entities)
    }
}
