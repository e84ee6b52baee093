//! Human renderer for CLI outputs.
//!
//! Pure formatting; handlers gather any extra data needed.

use crate::core::{Entity, EntityId, EntityState};
use crate::store::EntityStats;

/// Display label for a state (the dashboard's French badge text).
pub fn state_label(state: EntityState) -> &'static str {
    match state {
        EntityState::Draft => "Brouillon",
        EntityState::Submitted => "Soumis",
        EntityState::Validated => "Validé",
        EntityState::Rejected => "Rejeté",
        EntityState::Archived => "Archivé",
    }
}

pub fn render_created(entity: &Entity) -> String {
    let mut out = String::new();
    out.push_str(&format!("✓ Created entity: {}\n", entity.id));
    out.push_str(&format!("  Name: {}\n", entity.name));
    out.push_str(&format!("  Type: {}\n", entity.kind));
    out.push_str(&format!(
        "  State: {} ({})",
        entity.current_state,
        state_label(entity.current_state)
    ));
    out
}

pub fn render_transitioned(entity: &Entity) -> String {
    let mut out = String::new();
    match entity.last_transition() {
        Some(t) => {
            out.push_str(&format!(
                "✓ {}: {} → {}\n",
                entity.id, t.from_state, t.to_state
            ));
            if let Some(reason) = &t.reason {
                out.push_str(&format!("  Reason: {reason}\n"));
            }
        }
        None => out.push_str(&format!("✓ {}\n", entity.id)),
    }
    out.push_str(&next_actions(entity));
    out
}

pub fn render_revised(entity: &Entity) -> String {
    let number = entity.latest_version().map(|v| v.number).unwrap_or(0);
    format!("✓ {}: version {} added", entity.id, number)
}

pub fn render_updated(entity: &Entity) -> String {
    format!("✓ Updated entity: {}", entity.id)
}

pub fn render_deleted(id: &EntityId) -> String {
    format!("✓ Deleted entity: {id}")
}

pub fn render_entity(entity: &Entity) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} — {}\n", entity.id, entity.name));
    out.push_str(&format!("  Type: {}\n", entity.kind));
    out.push_str(&format!(
        "  State: {} ({})\n",
        entity.current_state,
        state_label(entity.current_state)
    ));
    out.push_str(&format!("  Created: {}\n", entity.created_at));
    out.push_str(&format!("  Updated: {}\n", entity.updated_at));

    out.push_str(&format!("\n  Versions ({}):\n", entity.versions.len()));
    for v in &entity.versions {
        out.push_str(&format!(
            "    v{} · {} · {}\n      {}\n",
            v.number, v.created_at, v.author, v.content
        ));
    }

    if entity.transitions.is_empty() {
        out.push_str("\n  No transitions yet\n");
    } else {
        out.push_str(&format!(
            "\n  Timeline ({} transitions):\n",
            entity.transitions.len()
        ));
        for t in &entity.transitions {
            out.push_str(&format!(
                "    {} → {} · {} · {}\n",
                t.from_state, t.to_state, t.timestamp, t.author
            ));
            if let Some(reason) = &t.reason {
                out.push_str(&format!("      Reason: {reason}\n"));
            }
        }
    }

    out.push_str(&next_actions(entity));
    out
}

pub fn render_list(entities: &[&Entity]) -> String {
    if entities.is_empty() {
        return "No entities found".into();
    }
    let mut out = String::new();
    for e in entities {
        out.push_str(&format!(
            "{}  [{}]  {} ({})  updated {}\n",
            e.id,
            e.current_state,
            e.name,
            e.kind,
            e.updated_at
        ));
    }
    out.push_str(&format!("\n{} entities", entities.len()));
    out
}

pub fn render_stats(stats: &EntityStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Entities: {}\n", stats.total_entities));

    out.push_str("\nBy state:\n");
    for state in EntityState::ALL {
        let count = stats.by_state.get(&state).copied().unwrap_or(0);
        let avg = stats
            .average_days_in_state
            .get(&state)
            .copied()
            .unwrap_or(0.0);
        out.push_str(&format!(
            "  {:<10} {:>4}   avg {:.1} days\n",
            state.as_str(),
            count,
            avg
        ));
    }

    out.push_str(&format!("\nRevision rate: {:.1}\n", stats.revision_rate));
    out.push_str(&format!("Success rate:  {:.0}%\n", stats.success_rate));

    if !stats.by_kind.is_empty() {
        out.push_str("\nBy type:\n");
        for (kind, count) in &stats.by_kind {
            out.push_str(&format!("  {kind:<10} {count:>4}\n"));
        }
    }
    if !stats.by_author.is_empty() {
        out.push_str("\nBy author:\n");
        for (author, count) in &stats.by_author {
            out.push_str(&format!("  {author:<14} {count:>4}\n"));
        }
    }
    out
}

fn next_actions(entity: &Entity) -> String {
    let targets = entity.current_state.allowed_targets();
    if targets.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = targets.iter().map(|s| s.as_str()).collect();
        format!("  Next: {}\n", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActorId, Timestamp};

    fn sample() -> Entity {
        Entity::create(
            EntityId::parse("ent-1").unwrap(),
            "Contrat Q1".into(),
            "Contrat".into(),
            "texte initial".into(),
            ActorId::new("Alice").unwrap(),
            Timestamp::from_unix_ms(0),
        )
        .unwrap()
    }

    #[test]
    fn created_output_names_the_entity() {
        let out = render_created(&sample());
        assert!(out.contains("ent-1"));
        assert!(out.contains("Contrat Q1"));
        assert!(out.contains("draft (Brouillon)"));
    }

    #[test]
    fn show_offers_next_actions_from_the_table() {
        let out = render_entity(&sample());
        assert!(out.contains("Next: submitted"));
    }

    #[test]
    fn archived_offers_no_next_actions() {
        let mut e = sample();
        for (i, to) in [
            EntityState::Submitted,
            EntityState::Validated,
            EntityState::Archived,
        ]
        .into_iter()
        .enumerate()
        {
            e.apply_transition(
                to,
                ActorId::new("Alice").unwrap(),
                None,
                Timestamp::from_unix_ms((i as i64 + 1) * 1_000),
            )
            .unwrap();
        }
        assert!(!render_entity(&e).contains("Next:"));
    }
}
