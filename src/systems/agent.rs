use rand::Rng;

use crate::rules::advantage::{attribute_beats, type_beats};
use crate::simulation::boss::Boss;
use crate::simulation::creature::Creature;

/// One decision for an automated creature turn. The decision itself
/// mutates nothing; whatever executes it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Evolve,
    Rest,
    Explore,
    AttackCreature { target_id: u32 },
    AttackBoss,
}

const LOW_HP_FRACTION: f64 = 0.3;
const LOW_HP_REST_CHANCE: f64 = 0.3;
const BOSS_FINISH_FRACTION: f64 = 0.5;
const BOSS_COIN_FLIP: f64 = 0.5;
const EXPLORE_CHANCE: f64 = 0.2;

/// Decides the next action for `actor` given the living opposition and
/// the boss, in fixed priority order: evolve, incapacitated rest, forced
/// boss attack, probabilistic self-preservation, boss-vs-enemy choice,
/// scored enemy attack, then explore/rest.
pub fn decide(
    actor: &Creature,
    enemies: &[&Creature],
    boss: Option<&Boss>,
    rng: &mut impl Rng,
) -> Decision {
    if actor.evolution_ready && actor.is_alive() {
        return Decision::Evolve;
    }
    if !actor.is_alive() {
        return Decision::Rest;
    }

    let living: Vec<&Creature> = enemies.iter().copied().filter(|e| e.is_alive()).collect();
    let boss_available = boss.map(Boss::is_targetable).unwrap_or(false);

    if living.is_empty() && boss_available {
        return Decision::AttackBoss;
    }

    // Self-preservation only applies while enemies are around; resting
    // with a free boss on the field wastes the turn.
    if !living.is_empty()
        && f64::from(actor.current_hp) < f64::from(actor.max_hp) * LOW_HP_FRACTION
        && rng.gen::<f64>() < LOW_HP_REST_CHANCE
    {
        return Decision::Rest;
    }

    if should_attack_boss(boss, living.is_empty(), rng) {
        return Decision::AttackBoss;
    }

    if let Some(target) = choose_target(actor, &living) {
        return Decision::AttackCreature {
            target_id: target.id,
        };
    }

    if boss_available {
        return Decision::AttackBoss;
    }

    if rng.gen::<f64>() < EXPLORE_CHANCE {
        return Decision::Explore;
    }
    Decision::Rest
}

/// Boss-vs-enemy choice: never against a downed boss, always when no
/// enemies remain, always to finish a boss under half health, otherwise a
/// coin flip.
fn should_attack_boss(boss: Option<&Boss>, no_living_enemies: bool, rng: &mut impl Rng) -> bool {
    let Some(boss) = boss else {
        return false;
    };
    if boss.is_defeated || boss.current_hp == 0 {
        return false;
    }
    if no_living_enemies {
        return true;
    }
    if f64::from(boss.current_hp) < f64::from(boss.max_hp) * BOSS_FINISH_FRACTION {
        return true;
    }
    rng.gen::<f64>() < BOSS_COIN_FLIP
}

/// Highest-scoring living enemy; ties keep the first maximum in input
/// order.
fn choose_target<'a>(actor: &Creature, living: &[&'a Creature]) -> Option<&'a Creature> {
    let mut best: Option<(&'a Creature, i32)> = None;
    for target in living {
        let score = score_target(actor, target);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((target, score)),
        }
    }
    best.map(|(target, _)| target)
}

fn score_target(actor: &Creature, target: &Creature) -> i32 {
    let mut score = 0;
    if type_beats(actor.creature_type, target.creature_type) {
        score += 10;
    }
    if let (Some(attacker), Some(defender)) = (actor.attribute, target.attribute) {
        if attribute_beats(attacker, defender) {
            score += 5;
        }
    }
    if f64::from(target.current_hp) < f64::from(target.max_hp) * 0.5 {
        score += 5;
    }
    if f64::from(target.combat_power()) < f64::from(actor.combat_power()) * 0.8 {
        score += 3;
    }
    score
}

/// Next automated creature to act within one player's turn: alive, not
/// yet acted, highest combat power, first maximum on ties. `None` once
/// everyone has gone.
pub fn choose_actor(creatures: &[Creature]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (idx, creature) in creatures.iter().enumerate() {
        if creature.has_acted || !creature.is_alive() {
            continue;
        }
        let power = creature.combat_power();
        match best {
            Some((_, best_power)) if power <= best_power => {}
            _ => best = Some((idx, power)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::catalog::repository::CatalogEntry;
    use crate::rules::advantage::{Attribute, CreatureType};

    fn make(
        id: u32,
        creature_type: CreatureType,
        attribute: Option<Attribute>,
        hp: i32,
        power: i32,
    ) -> Creature {
        let template = CatalogEntry {
            id: i64::from(id),
            name: format!("Creature {}", id),
            image: None,
            level: 1,
            creature_type,
            attribute,
            evolution_targets: Vec::new(),
            active: true,
            boss_eligible: false,
        };
        let mut creature = Creature::from_template(id, &template).unwrap();
        creature.current_hp = hp;
        creature.base_power = power;
        creature
    }

    fn boss(hp: i32, max_hp: i32, defeated: bool) -> Boss {
        Boss {
            catalog_id: 50,
            name: "Devimon".to_string(),
            image: None,
            level: 2,
            current_hp: hp,
            max_hp,
            calculated_dp: 2_000,
            spawned_on_turn: 2,
            is_defeated: defeated,
        }
    }

    #[test]
    fn incapacitated_creatures_always_rest() {
        let actor = make(1, CreatureType::Data, None, 0, 1_000);
        let enemy = make(2, CreatureType::Data, None, 1_000, 1_000);
        let live_boss = boss(6_000, 6_000, false);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = decide(&actor, &[&enemy], Some(&live_boss), &mut rng);
            assert_eq!(decision, Decision::Rest);
        }
    }

    #[test]
    fn evolution_eligibility_overrides_everything_while_alive() {
        let mut actor = make(1, CreatureType::Data, None, 500, 1_000);
        actor.evolution_ready = true;
        let enemy = make(2, CreatureType::Vaccine, None, 1_000, 9_000);
        let live_boss = boss(100, 6_000, false);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = decide(&actor, &[&enemy], Some(&live_boss), &mut rng);
            assert_eq!(decision, Decision::Evolve);
        }
    }

    #[test]
    fn no_enemies_and_a_live_boss_forces_the_boss_attack() {
        let actor = make(1, CreatureType::Data, None, 100, 1_000);
        let live_boss = boss(6_000, 6_000, false);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = decide(&actor, &[], Some(&live_boss), &mut rng);
            assert_eq!(decision, Decision::AttackBoss);
        }
    }

    #[test]
    fn defeated_boss_is_never_attacked() {
        let actor = make(1, CreatureType::Data, None, 3_000, 1_000);
        let dead_boss = boss(0, 6_000, true);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = decide(&actor, &[], Some(&dead_boss), &mut rng);
            assert!(matches!(decision, Decision::Rest | Decision::Explore));
        }
    }

    #[test]
    fn wounded_boss_is_finished_over_enemy_targets() {
        let actor = make(1, CreatureType::Data, None, 3_000, 1_000);
        let enemy = make(2, CreatureType::Data, None, 3_000, 1_000);
        let wounded = boss(2_000, 6_000, false);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = decide(&actor, &[&enemy], Some(&wounded), &mut rng);
            assert_eq!(decision, Decision::AttackBoss);
        }
    }

    #[test]
    fn scoring_prefers_type_advantage_and_breaks_ties_first() {
        let actor = make(1, CreatureType::Vaccine, Some(Attribute::Fire), 3_000, 1_000);
        let neutral = make(2, CreatureType::Free, None, 3_000, 1_000);
        let virus = make(3, CreatureType::Virus, None, 3_000, 1_000);
        let twin = make(4, CreatureType::Virus, None, 3_000, 1_000);

        let picked = choose_target(&actor, &[&neutral, &virus, &twin]).unwrap();
        assert_eq!(picked.id, 3);
    }

    #[test]
    fn scoring_adds_up_all_bonuses() {
        let actor = make(1, CreatureType::Vaccine, Some(Attribute::Fire), 3_000, 1_000);
        let mut target = make(2, CreatureType::Virus, Some(Attribute::Nature), 1_000, 700);
        assert_eq!(score_target(&actor, &target), 10 + 5 + 5 + 3);

        target.current_hp = 3_000;
        assert_eq!(score_target(&actor, &target), 10 + 5 + 3);
    }

    #[test]
    fn healthy_actor_with_enemies_attacks_one_of_them() {
        let actor = make(1, CreatureType::Vaccine, None, 3_000, 1_000);
        let enemy = make(2, CreatureType::Virus, None, 3_000, 1_000);
        let mut rng = StdRng::seed_from_u64(11);
        let decision = decide(&actor, &[&enemy], None, &mut rng);
        assert_eq!(decision, Decision::AttackCreature { target_id: 2 });
    }

    #[test]
    fn actor_selection_takes_strongest_unacted_living_creature() {
        let weak = make(1, CreatureType::Data, None, 3_000, 500);
        let strong = make(2, CreatureType::Data, None, 3_000, 2_000);
        let down = make(3, CreatureType::Data, None, 0, 9_000);
        let twin = make(4, CreatureType::Data, None, 3_000, 2_000);

        let team = vec![weak, strong, down, twin];
        assert_eq!(choose_actor(&team), Some(1));

        let spent: Vec<Creature> = team
            .iter()
            .cloned()
            .map(|mut creature| {
                creature.has_acted = true;
                creature
            })
            .collect();
        assert_eq!(choose_actor(&spent), None);
    }
}
