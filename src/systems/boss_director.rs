use std::collections::BTreeMap;

use rand::Rng;

use crate::catalog::repository::CatalogEntry;
use crate::rules::balancing::BalanceError;
use crate::simulation::boss::Boss;
use crate::simulation::game::Player;

/// Turns a spawn waits after the previous boss fell, and before the first
/// boss of a fresh game.
pub const SPAWN_COOLDOWN_TURNS: u64 = 2;

/// Whether a boss should spawn this turn. Never while an undefeated boss
/// is on the field. `last_defeated_turn == 0` doubles as "no boss has ever
/// been defeated", which puts the first spawn on turn 2 with the same
/// expression as the post-defeat cooldown.
pub fn should_spawn(turn_count: u64, last_defeated_turn: u64, active: Option<&Boss>) -> bool {
    if let Some(boss) = active {
        if !boss.is_defeated {
            return false;
        }
    }
    turn_count >= last_defeated_turn + SPAWN_COOLDOWN_TURNS
}

/// Level held by the most living creatures across all players. Ties
/// resolve to the lowest level; an empty battlefield counts as level 1.
pub fn most_common_level(players: &[Player]) -> u8 {
    let mut tally: BTreeMap<u8, usize> = BTreeMap::new();
    for player in players {
        for creature in player.creatures.iter().filter(|c| c.is_alive()) {
            *tally.entry(creature.level).or_insert(0) += 1;
        }
    }

    let mut best_level = 1u8;
    let mut best_count = 0usize;
    for (level, count) in tally {
        if count > best_count {
            best_level = level;
            best_count = count;
        }
    }
    best_level
}

/// Uniform pick among boss-eligible entries at `target_level`. When no
/// boss is authored at that level the pool widens to every eligible entry
/// rather than skipping the spawn; `None` only when the catalog has no
/// boss-eligible entry at all.
pub fn select_boss_template<'a>(
    entries: &'a [CatalogEntry],
    target_level: u8,
    rng: &mut impl Rng,
) -> Option<&'a CatalogEntry> {
    let at_level: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| entry.boss_eligible && entry.level == target_level)
        .collect();
    if !at_level.is_empty() {
        return Some(at_level[rng.gen_range(0..at_level.len())]);
    }

    let eligible: Vec<&CatalogEntry> = entries.iter().filter(|entry| entry.boss_eligible).collect();
    if eligible.is_empty() {
        return None;
    }
    Some(eligible[rng.gen_range(0..eligible.len())])
}

/// Full spawn pass: target level is one above the most common living
/// level. `Ok(None)` means the catalog offers nothing to spawn, which
/// callers treat as "no spawn this cycle", not an error.
pub fn spawn_boss(
    entries: &[CatalogEntry],
    players: &[Player],
    current_turn: u64,
    rng: &mut impl Rng,
) -> Result<Option<Boss>, BalanceError> {
    let target_level = most_common_level(players).saturating_add(1);
    let Some(template) = select_boss_template(entries, target_level, rng) else {
        return Ok(None);
    };
    Ok(Some(Boss::from_template(template, current_turn)?))
}
