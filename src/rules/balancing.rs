use serde::{Deserialize, Serialize};

/// Hit points and combat power for one level of the balancing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub hit_points: i32,
    pub combat_power: i32,
}

/// Tuned multiplier on boss hit points so encounters outlast ordinary
/// fights while attack numbers stay commensurate with player creatures.
pub const BOSS_HP_MULTIPLIER: i32 = 3;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 6;

const LEVEL_TABLE: [(u8, i32, i32); 6] = [
    (1, 3_000, 1_000),
    (2, 6_000, 2_000),
    (3, 12_000, 4_000),
    (4, 24_000, 8_000),
    (5, 48_000, 16_000),
    (6, 96_000, 32_000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    LevelOutOfRange(u8),
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::LevelOutOfRange(level) => {
                write!(f, "no balancing entry for level {}", level)
            }
        }
    }
}

impl std::error::Error for BalanceError {}

/// Stats for a standard creature at `level`. Levels outside the table are
/// rejected rather than clamped; clamping would mask catalog authoring
/// mistakes.
pub fn creature_stats(level: u8) -> Result<LevelStats, BalanceError> {
    LEVEL_TABLE
        .iter()
        .find(|(entry_level, _, _)| *entry_level == level)
        .map(|(_, hit_points, combat_power)| LevelStats {
            hit_points: *hit_points,
            combat_power: *combat_power,
        })
        .ok_or(BalanceError::LevelOutOfRange(level))
}

/// Boss variant of the formula: same combat power, triple hit points.
pub fn boss_stats(level: u8) -> Result<LevelStats, BalanceError> {
    let base = creature_stats(level)?;
    Ok(LevelStats {
        hit_points: base.hit_points * BOSS_HP_MULTIPLIER,
        combat_power: base.combat_power,
    })
}

/// Damage rounding used by the world turn and attack resolution.
pub fn round_to_nearest_100(value: f64) -> i32 {
    ((value / 100.0).round() as i32) * 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creature_stats_are_deterministic_and_monotonic() {
        let mut previous = LevelStats {
            hit_points: 0,
            combat_power: 0,
        };
        for level in MIN_LEVEL..=MAX_LEVEL {
            let first = creature_stats(level).unwrap();
            let second = creature_stats(level).unwrap();
            assert_eq!(first, second);
            assert!(first.hit_points >= previous.hit_points);
            assert!(first.combat_power >= previous.combat_power);
            previous = first;
        }
    }

    #[test]
    fn level_three_matches_tuned_values() {
        let stats = creature_stats(3).unwrap();
        assert_eq!(stats.hit_points, 12_000);
        assert_eq!(stats.combat_power, 4_000);
    }

    #[test]
    fn boss_hit_points_are_exactly_triple() {
        for level in MIN_LEVEL..=MAX_LEVEL {
            let creature = creature_stats(level).unwrap();
            let boss = boss_stats(level).unwrap();
            assert_eq!(boss.hit_points, creature.hit_points * 3);
            assert_eq!(boss.combat_power, creature.combat_power);
        }
    }

    #[test]
    fn out_of_range_levels_are_rejected() {
        assert_eq!(creature_stats(0), Err(BalanceError::LevelOutOfRange(0)));
        assert_eq!(creature_stats(7), Err(BalanceError::LevelOutOfRange(7)));
        assert_eq!(boss_stats(200), Err(BalanceError::LevelOutOfRange(200)));
    }

    #[test]
    fn rounding_lands_on_hundreds() {
        assert_eq!(round_to_nearest_100(500.0), 500);
        assert_eq!(round_to_nearest_100(1_850.0), 1_900);
        assert_eq!(round_to_nearest_100(1_849.0), 1_800);
        assert_eq!(round_to_nearest_100(33.0), 0);
    }
}
