use crate::rules::balancing::round_to_nearest_100;
use crate::simulation::game::GameState;

/// Outcome of one boss group attack, for the caller to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldTurnReport {
    pub per_creature_damage: i32,
    pub creatures_hit: usize,
}

/// Resolves the boss's group attack: half its calculated power, split
/// evenly over every living creature and rounded to the nearest 100, then
/// applied simultaneously. `None` when no targetable boss is active or
/// nothing is left standing.
pub fn resolve_world_turn(state: &mut GameState) -> Option<WorldTurnReport> {
    let calculated_dp = match state.boss.as_ref() {
        Some(boss) if boss.is_targetable() => boss.calculated_dp,
        _ => return None,
    };

    let alive = state.living_creature_count();
    if alive == 0 {
        return None;
    }

    let total_damage = f64::from(calculated_dp) * 0.5;
    let per_creature = round_to_nearest_100(total_damage / alive as f64);
    for creature in state.living_creatures_mut() {
        creature.take_damage(per_creature);
    }

    Some(WorldTurnReport {
        per_creature_damage: per_creature,
        creatures_hit: alive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::CatalogEntry;
    use crate::rules::advantage::CreatureType;
    use crate::simulation::boss::Boss;
    use crate::simulation::creature::Creature;
    use crate::simulation::game::Player;

    fn template(level: u8) -> CatalogEntry {
        CatalogEntry {
            id: 1,
            name: "SkullGreymon".to_string(),
            image: None,
            level,
            creature_type: CreatureType::Virus,
            attribute: None,
            evolution_targets: Vec::new(),
            active: true,
            boss_eligible: true,
        }
    }

    fn state_with(boss_level: Option<u8>, creature_hp: &[i32]) -> GameState {
        let creatures = creature_hp
            .iter()
            .enumerate()
            .map(|(idx, hp)| {
                let mut creature =
                    Creature::from_template(idx as u32 + 1, &template(1)).unwrap();
                creature.current_hp = *hp;
                creature
            })
            .collect();
        let mut state = GameState::new(vec![Player {
            id: 1,
            name: "Tamer".to_string(),
            avatar: None,
            creatures,
        }]);
        state.boss = boss_level.map(|level| Boss::from_template(&template(level), 2).unwrap());
        state
    }

    #[test]
    fn level_three_boss_hits_four_creatures_for_five_hundred() {
        let mut state = state_with(Some(3), &[3_000, 3_000, 3_000, 3_000]);
        let report = resolve_world_turn(&mut state).unwrap();
        assert_eq!(report.per_creature_damage, 500);
        assert_eq!(report.creatures_hit, 4);
        for creature in &state.players[0].creatures {
            assert_eq!(creature.current_hp, 2_500);
        }
    }

    #[test]
    fn share_is_always_a_multiple_of_one_hundred() {
        let mut state = state_with(Some(3), &[3_000, 3_000, 3_000]);
        let report = resolve_world_turn(&mut state).unwrap();
        assert_eq!(report.per_creature_damage % 100, 0);
        // 2000 / 3 rounds to 700.
        assert_eq!(report.per_creature_damage, 700);
    }

    #[test]
    fn damage_never_drives_hit_points_negative() {
        let mut state = state_with(Some(3), &[200, 3_000]);
        resolve_world_turn(&mut state).unwrap();
        assert_eq!(state.players[0].creatures[0].current_hp, 0);
        assert_eq!(state.players[0].creatures[1].current_hp, 2_000);
    }

    #[test]
    fn incapacitated_creatures_are_not_counted_or_hit() {
        let mut state = state_with(Some(3), &[0, 3_000, 3_000]);
        let report = resolve_world_turn(&mut state).unwrap();
        assert_eq!(report.creatures_hit, 2);
        assert_eq!(report.per_creature_damage, 1_000);
        assert_eq!(state.players[0].creatures[0].current_hp, 0);
    }

    #[test]
    fn no_boss_or_no_survivors_is_a_no_op() {
        let mut no_boss = state_with(None, &[3_000]);
        assert!(resolve_world_turn(&mut no_boss).is_none());

        let mut wiped = state_with(Some(3), &[0, 0]);
        assert!(resolve_world_turn(&mut wiped).is_none());

        let mut defeated = state_with(Some(3), &[3_000]);
        if let Some(boss) = defeated.boss.as_mut() {
            boss.take_damage(boss.max_hp);
        }
        assert!(resolve_world_turn(&mut defeated).is_none());
    }
}
