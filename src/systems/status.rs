use crate::simulation::creature::{Creature, StatusEffect, StatusTag};

/// Attaches `tag` until `current_turn + duration_turns`. A status with the
/// same tag is refreshed, never stacked.
pub fn attach(creature: &mut Creature, tag: StatusTag, current_turn: u64, duration_turns: u64) {
    let expires_on_turn = current_turn + duration_turns;
    if let Some(existing) = creature.statuses.iter_mut().find(|status| status.tag == tag) {
        existing.expires_on_turn = expires_on_turn;
    } else {
        creature.statuses.push(StatusEffect {
            tag,
            expires_on_turn,
        });
    }
}

/// The authoritative view: anything whose expiry turn is at or before
/// `current_turn` is treated as absent, whether or not it still sits in
/// storage.
pub fn active_statuses(creature: &Creature, current_turn: u64) -> Vec<StatusTag> {
    creature
        .statuses
        .iter()
        .filter(|status| status.expires_on_turn > current_turn)
        .map(|status| status.tag)
        .collect()
}

pub fn has_status(creature: &Creature, tag: StatusTag, current_turn: u64) -> bool {
    creature
        .statuses
        .iter()
        .any(|status| status.tag == tag && status.expires_on_turn > current_turn)
}

/// Lazy sweep, run when a creature's eligible actions are evaluated. There
/// is no background scheduler; stale entries just wait here for the next
/// evaluation.
pub fn purge_expired(creature: &mut Creature, current_turn: u64) {
    creature
        .statuses
        .retain(|status| status.expires_on_turn > current_turn);
}
