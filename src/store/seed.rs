//! Generated sample dataset.
//!
//! Seeds an empty or unreadable slot so the dashboard has something to
//! show on first run. Shapes mirror the demo data the product ships with:
//! a dozen entities across the five kinds, randomized histories that all
//! satisfy the lifecycle invariants.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::{ActorId, Clock, Entity, EntityId, EntityState, Timestamp};

const KINDS: [&str; 5] = ["Document", "Contrat", "Facture", "Rapport", "Demande"];
const AUTHORS: [&str; 5] = [
    "Alice Martin",
    "Bob Johnson",
    "Claire Dupont",
    "David Chen",
    "Emma Wilson",
];

const ENTITY_COUNT: usize = 12;
const MAX_VERSIONS: u32 = 5;

/// Generate the sample collection.
///
/// Histories are driven by the transition table itself: a target state is
/// picked and the unique legal path from draft is walked, so every seeded
/// entity passes `check_invariants`.
pub fn sample_entities(clock: &mut Clock) -> Vec<Entity> {
    let mut rng = rand::thread_rng();
    let now_ms = Timestamp::now().unix_ms();

    (0..ENTITY_COUNT)
        .map(|i| {
            let kind = KINDS[i % KINDS.len()];
            let created_ms = now_ms - rng.gen_range(30..300) * 86_400_000;
            let mut entity = Entity::create(
                EntityId::generate(),
                format!("{kind} {}", 1000 + i),
                kind.to_string(),
                "Version 1 du document avec les modifications apportées.".to_string(),
                random_author(&mut rng),
                Timestamp::from_unix_ms(created_ms),
            )
            .unwrap_or_else(|_| unreachable!("seed inputs are non-empty"));

            let mut last_ms = created_ms;
            for number in 2..=rng.gen_range(1..=MAX_VERSIONS) {
                last_ms = rng.gen_range(last_ms..=now_ms);
                let content =
                    format!("Version {number} du document avec les modifications apportées.");
                entity
                    .revise(content, random_author(&mut rng), Timestamp::from_unix_ms(last_ms))
                    .unwrap_or_else(|_| unreachable!("seed content is non-empty"));
            }

            let target = *EntityState::ALL
                .choose(&mut rng)
                .unwrap_or(&EntityState::Draft);
            for step in path_to(target) {
                last_ms = rng.gen_range(last_ms..=now_ms);
                let reason = (*step == EntityState::Rejected)
                    .then(|| "Documents incomplets".to_string());
                entity
                    .apply_transition(
                        *step,
                        random_author(&mut rng),
                        reason,
                        Timestamp::from_unix_ms(last_ms),
                    )
                    .unwrap_or_else(|_| unreachable!("seed paths follow the table"));
            }

            clock.observe(entity.updated_at);
            entity
        })
        .collect()
}

/// The legal path from draft to `target`, excluding draft itself.
fn path_to(target: EntityState) -> &'static [EntityState] {
    use EntityState::*;
    match target {
        Draft => &[],
        Submitted => &[Submitted],
        Validated => &[Submitted, Validated],
        Rejected => &[Submitted, Rejected],
        Archived => &[Submitted, Validated, Archived],
    }
}

fn random_author(rng: &mut impl Rng) -> ActorId {
    let name = AUTHORS.choose(rng).unwrap_or(&AUTHORS[0]);
    ActorId::new(*name).unwrap_or_else(|_| unreachable!("seed authors are non-empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_entities_satisfy_all_invariants() {
        let mut clock = Clock::new();
        let entities = sample_entities(&mut clock);
        assert_eq!(entities.len(), ENTITY_COUNT);
        for entity in &entities {
            entity.check_invariants().unwrap();
            assert!(!entity.versions.is_empty());
            assert!(entity.created_at <= entity.updated_at);
        }
    }

    #[test]
    fn seed_rejections_carry_a_reason() {
        let mut clock = Clock::new();
        for entity in sample_entities(&mut clock) {
            for t in &entity.transitions {
                if t.to_state == EntityState::Rejected {
                    assert_eq!(t.reason.as_deref(), Some("Documents incomplets"));
                }
            }
        }
    }

    #[test]
    fn seed_advances_the_clock_past_every_entity() {
        let mut clock = Clock::new();
        let entities = sample_entities(&mut clock);
        let next = clock.tick();
        for entity in &entities {
            assert!(next > entity.updated_at);
        }
    }
}
