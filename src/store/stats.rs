//! Aggregate statistics over the collection.
//!
//! Consumed by the dashboard overview cards and the statistics page
//! breakdowns. Pure derivation - nothing here mutates an entity.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{Entity, EntityState, Timestamp};

const DAY_MS: f64 = 86_400_000.0;

/// Snapshot of collection-level metrics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStats {
    pub total_entities: usize,
    pub by_state: BTreeMap<EntityState, usize>,
    /// Mean days spent in each state, over every completed or ongoing stay.
    pub average_days_in_state: BTreeMap<EntityState, f64>,
    /// Mean number of versions per entity.
    pub revision_rate: f64,
    /// Share of decided entities (validated, archived, rejected) that were
    /// validated or archived, as a percentage.
    pub success_rate: f64,
    pub by_author: BTreeMap<String, usize>,
    pub by_kind: BTreeMap<String, usize>,
}

impl EntityStats {
    /// Compute stats as of `now` (the end of every ongoing stay).
    pub fn compute(entities: &[Entity], now: Timestamp) -> Self {
        let mut by_state = BTreeMap::new();
        let mut by_author = BTreeMap::new();
        let mut by_kind = BTreeMap::new();
        let mut stay_ms: BTreeMap<EntityState, (f64, usize)> = BTreeMap::new();
        let mut versions = 0usize;
        let mut decided = 0usize;
        let mut succeeded = 0usize;

        for state in EntityState::ALL {
            by_state.insert(state, 0);
        }

        for entity in entities {
            *by_state.entry(entity.current_state).or_insert(0) += 1;
            *by_kind.entry(entity.kind.clone()).or_insert(0) += 1;
            if let Some(creator) = entity.versions.first() {
                *by_author
                    .entry(creator.author.as_str().to_string())
                    .or_insert(0) += 1;
            }
            versions += entity.versions.len();

            match entity.current_state {
                EntityState::Validated | EntityState::Archived => {
                    decided += 1;
                    succeeded += 1;
                }
                EntityState::Rejected => decided += 1,
                _ => {}
            }

            // Each stay runs from its start (creation or the transition that
            // entered the state) to the next transition, or `now` for the
            // state the entity currently occupies.
            let mut state = EntityState::Draft;
            let mut since = entity.created_at;
            for t in &entity.transitions {
                let slot = stay_ms.entry(state).or_insert((0.0, 0));
                slot.0 += (t.timestamp.unix_ms() - since.unix_ms()).max(0) as f64;
                slot.1 += 1;
                state = t.to_state;
                since = t.timestamp;
            }
            let slot = stay_ms.entry(state).or_insert((0.0, 0));
            slot.0 += (now.unix_ms() - since.unix_ms()).max(0) as f64;
            slot.1 += 1;
        }

        let mut average_days_in_state = BTreeMap::new();
        for state in EntityState::ALL {
            let days = match stay_ms.get(&state) {
                Some((total, count)) if *count > 0 => total / DAY_MS / *count as f64,
                _ => 0.0,
            };
            average_days_in_state.insert(state, days);
        }

        Self {
            total_entities: entities.len(),
            by_state,
            average_days_in_state,
            revision_rate: if entities.is_empty() {
                0.0
            } else {
                versions as f64 / entities.len() as f64
            },
            success_rate: if decided == 0 {
                0.0
            } else {
                succeeded as f64 / decided as f64 * 100.0
            },
            by_author,
            by_kind,
        }
    }
}
