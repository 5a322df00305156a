pub mod advantage;
pub mod balancing;

pub use advantage::{attribute_beats, type_beats, Attribute, CreatureType};
pub use balancing::{
    boss_stats, creature_stats, round_to_nearest_100, BalanceError, LevelStats,
    BOSS_HP_MULTIPLIER, MAX_LEVEL, MIN_LEVEL,
};
