use rand::Rng;

use crate::catalog::repository::CatalogEntry;
use crate::rules::balancing::{creature_stats, BalanceError};
use crate::simulation::creature::Creature;

/// Floor for the cosmetic reveal pool shown to clients.
pub const DISPLAY_POOL_MIN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveError {
    NoTargetsAvailable { next_level: u8 },
}

impl std::fmt::Display for EvolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvolveError::NoTargetsAvailable { next_level } => {
                write!(f, "no active evolution targets at level {}", next_level)
            }
        }
    }
}

impl std::error::Error for EvolveError {}

#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The committed next form.
    pub chosen: CatalogEntry,
    /// Cosmetic reveal pool; the committed result is `chosen` regardless
    /// of what this contains.
    pub display_pool: Vec<CatalogEntry>,
    /// Whether the pick came from the creature's authored evolution line.
    /// Callers use this to decide whether to lock the path.
    pub from_evolution_line: bool,
}

/// Picks the next form for an evolution-eligible creature. The pool is
/// every active catalog entry one level up, restricted to the creature's
/// authored line when that intersection is non-empty; an authored line
/// matching nothing falls back to the open pool instead of failing.
pub fn resolve_evolution(
    creature: &Creature,
    entries: &[CatalogEntry],
    rng: &mut impl Rng,
) -> Result<EvolutionOutcome, EvolveError> {
    let next_level = creature.level.saturating_add(1);
    let unrestricted: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| entry.active && entry.level == next_level)
        .collect();
    if unrestricted.is_empty() {
        return Err(EvolveError::NoTargetsAvailable { next_level });
    }

    let line: Vec<&CatalogEntry> = unrestricted
        .iter()
        .copied()
        .filter(|entry| creature.evolution_targets.contains(&entry.id))
        .collect();

    let (pool, from_evolution_line) = if line.is_empty() {
        (&unrestricted, false)
    } else {
        (&line, true)
    };

    let chosen = pool[rng.gen_range(0..pool.len())].clone();

    let mut display_pool: Vec<CatalogEntry> =
        pool.iter().map(|entry| (*entry).clone()).collect();
    let mut extras: Vec<&CatalogEntry> = unrestricted
        .iter()
        .copied()
        .filter(|entry| !display_pool.iter().any(|shown| shown.id == entry.id))
        .collect();
    while display_pool.len() < DISPLAY_POOL_MIN && !extras.is_empty() {
        let idx = rng.gen_range(0..extras.len());
        display_pool.push(extras.swap_remove(idx).clone());
    }

    Ok(EvolutionOutcome {
        chosen,
        display_pool,
        from_evolution_line,
    })
}

/// Commits the chosen form onto the battle instance: new identity, fresh
/// stats from the balancing table (full heal), and the new form's own
/// evolution line. Item bonuses and carried items survive the change.
pub fn apply_evolution(creature: &mut Creature, entry: &CatalogEntry) -> Result<(), BalanceError> {
    let stats = creature_stats(entry.level)?;
    creature.catalog_id = entry.id;
    creature.name = entry.name.clone();
    creature.image = entry.image.clone();
    creature.level = entry.level;
    creature.creature_type = entry.creature_type;
    creature.attribute = entry.attribute;
    creature.base_power = stats.combat_power;
    creature.max_hp = stats.hit_points;
    creature.current_hp = stats.hit_points;
    creature.evolution_targets = entry.evolution_targets.clone();
    creature.evolution_ready = false;
    Ok(())
}
