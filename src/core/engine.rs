use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::repository::{CatalogEntry, CreatureCatalog};
use crate::core::serialization::{load_state_from_path, save_state_to_path, SaveState};
use crate::rules::advantage::type_beats;
use crate::rules::balancing::round_to_nearest_100;
use crate::simulation::game::{GameState, Player};
use crate::systems::agent::{choose_actor, decide, Decision};
use crate::systems::boss_director::{should_spawn, spawn_boss};
use crate::systems::evolution::{apply_evolution, resolve_evolution};
use crate::systems::rewards::roll_drops;
use crate::systems::status::purge_expired;
use crate::systems::world_turn::resolve_world_turn;

/// Fraction of max hit points restored by a resting creature.
const REST_HEAL_FRACTION: f64 = 0.2;
/// Chance an exploring creature turns up a field item.
const EXPLORE_FIND_CHANCE: f64 = 0.35;
/// Item found in the field; matches the common healing item in authored
/// drop tables.
const FIELD_ITEM_ID: i64 = 501;

/// Wrapper around the battle state, the content catalog and the seeded
/// RNG. All turn resolution flows through here; callers read state and
/// feed rounds.
pub struct Game {
    state: GameState,
    catalog: Box<dyn CreatureCatalog>,
    roster: Vec<CatalogEntry>,
    rng: StdRng,
    seed: u64,
}

impl Game {
    /// Create a new battle over the given catalog and participants. The
    /// catalog is snapshotted once; content edits made mid-battle do not
    /// reach an already-running game.
    pub fn new(
        catalog: Box<dyn CreatureCatalog>,
        players: Vec<Player>,
        seed: u64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let roster = catalog.list_creatures()?;
        Ok(Self {
            state: GameState::new(players),
            catalog,
            roster,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Take everything logged since the last drain, oldest first.
    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.state.log)
    }

    /// Resolve one full round: every player's creatures act in power
    /// order, the boss director runs between actions, and the round closes
    /// with the boss group attack and a turn increment.
    pub fn advance_round(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.check_boss_spawn()?;

        for player_idx in 0..self.state.players.len() {
            self.state.active_player = player_idx;
            while let Some(actor_idx) = choose_actor(&self.state.players[player_idx].creatures) {
                let turn = self.state.turn_count;
                purge_expired(
                    &mut self.state.players[player_idx].creatures[actor_idx],
                    turn,
                );

                let actor = self.state.players[player_idx].creatures[actor_idx].clone();
                let enemies: Vec<_> = self
                    .state
                    .living_enemies_of(player_idx)
                    .into_iter()
                    .cloned()
                    .collect();
                let enemy_refs: Vec<_> = enemies.iter().collect();
                let decision = decide(&actor, &enemy_refs, self.state.boss.as_ref(), &mut self.rng);

                self.state.players[player_idx].creatures[actor_idx].has_acted = true;
                self.execute(player_idx, actor_idx, decision)?;
                self.check_boss_spawn()?;
            }
        }

        if let Some(report) = resolve_world_turn(&mut self.state) {
            self.state.push_log(format!(
                "The boss lashes out, hitting {} creatures for {} each!",
                report.creatures_hit, report.per_creature_damage
            ));
        }

        for player in &mut self.state.players {
            for creature in &mut player.creatures {
                creature.has_acted = false;
            }
        }
        self.state.turn_count += 1;
        Ok(())
    }

    fn check_boss_spawn(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !should_spawn(
            self.state.turn_count,
            self.state.last_boss_defeated_turn,
            self.state.boss.as_ref(),
        ) {
            return Ok(());
        }
        if let Some(boss) = spawn_boss(
            &self.roster,
            &self.state.players,
            self.state.turn_count,
            &mut self.rng,
        )? {
            self.state
                .push_log(format!("A wild {} appears! ({} HP)", boss.name, boss.max_hp));
            self.state.boss = Some(boss);
        }
        Ok(())
    }

    fn execute(
        &mut self,
        player_idx: usize,
        actor_idx: usize,
        decision: Decision,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match decision {
            Decision::Rest => {
                let creature = &mut self.state.players[player_idx].creatures[actor_idx];
                let amount = (f64::from(creature.max_hp) * REST_HEAL_FRACTION) as i32;
                creature.heal(amount);
                let entry = format!("{} rests and recovers {} HP.", creature.name, amount);
                self.state.push_log(entry);
            }
            Decision::Explore => {
                let name = self.state.players[player_idx].creatures[actor_idx].name.clone();
                if self.rng.gen::<f64>() < EXPLORE_FIND_CHANCE {
                    self.state.item_bag.push(FIELD_ITEM_ID);
                    self.state
                        .push_log(format!("{} explores and finds an item!", name));
                } else {
                    self.state
                        .push_log(format!("{} explores but finds nothing.", name));
                }
            }
            Decision::AttackCreature { target_id } => {
                let attacker = self.state.players[player_idx].creatures[actor_idx].clone();
                let Some(target) = self.state.creature_by_id_mut(target_id) else {
                    return Ok(());
                };
                let mut dealt = round_to_nearest_100(f64::from(attacker.combat_power()) * 0.5);
                if type_beats(attacker.creature_type, target.creature_type) {
                    dealt += dealt / 4;
                }
                target.take_damage(dealt);
                let target_name = target.name.clone();
                let downed = !target.is_alive();
                self.state.push_log(format!(
                    "{} attacks {} for {} damage!",
                    attacker.name, target_name, dealt
                ));
                if downed {
                    self.state
                        .push_log(format!("{} is down!", target_name));
                }
            }
            Decision::AttackBoss => {
                let attacker = self.state.players[player_idx].creatures[actor_idx].clone();
                let dealt = round_to_nearest_100(f64::from(attacker.combat_power()) * 0.5);
                let Some(boss) = self.state.boss.as_mut() else {
                    return Ok(());
                };
                boss.take_damage(dealt);
                let boss_name = boss.name.clone();
                let boss_catalog_id = boss.catalog_id;
                let defeated = boss.is_defeated;
                self.state.push_log(format!(
                    "{} attacks {} for {} damage!",
                    attacker.name, boss_name, dealt
                ));
                if defeated {
                    self.state.last_boss_defeated_turn = self.state.turn_count;
                    self.state.bosses_defeated += 1;
                    self.state
                        .push_log(format!("{} has been defeated!", boss_name));
                    let drops = self.catalog.boss_drops(boss_catalog_id)?;
                    let awarded = roll_drops(&drops, &mut self.rng);
                    for item_id in awarded {
                        self.state.item_bag.push(item_id);
                        self.state
                            .push_log(format!("The party obtains item #{}!", item_id));
                    }
                }
            }
            Decision::Evolve => {
                let creature = self.state.players[player_idx].creatures[actor_idx].clone();
                match resolve_evolution(&creature, &self.roster, &mut self.rng) {
                    Ok(outcome) => {
                        let target = &mut self.state.players[player_idx].creatures[actor_idx];
                        let old_name = target.name.clone();
                        apply_evolution(target, &outcome.chosen)?;
                        if outcome.from_evolution_line {
                            target.evolution_locked = true;
                        }
                        let new_name = target.name.clone();
                        self.state
                            .push_log(format!("{} evolves into {}!", old_name, new_name));
                    }
                    Err(err) => {
                        let target = &mut self.state.players[player_idx].creatures[actor_idx];
                        target.evolution_ready = false;
                        let name = target.name.clone();
                        self.state
                            .push_log(format!("{} cannot evolve: {}.", name, err));
                    }
                }
            }
        }
        Ok(())
    }

    /// Extract a serializable save state from the current battle.
    pub fn save_state(&self) -> SaveState {
        SaveState::new(self.seed, self.state.clone())
    }

    /// Apply a saved state back into the live battle. The RNG restarts
    /// from the saved seed.
    pub fn load_state(&mut self, save: SaveState) {
        self.seed = save.seed;
        self.rng = StdRng::seed_from_u64(save.seed);
        self.state = save.state;
    }

    /// Save state directly to a file path.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        save_state_to_path(&self.save_state(), path)
    }

    /// Load state directly from a file path.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let save = load_state_from_path(path)?;
        self.load_state(save);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::MemoryCatalog;
    use crate::catalog::repository::BossDrop;
    use crate::rules::advantage::CreatureType;
    use crate::simulation::creature::Creature;

    fn entry(id: i64, level: u8, boss_eligible: bool) -> CatalogEntry {
        CatalogEntry {
            id,
            name: format!("Creature {}", id),
            image: None,
            level,
            creature_type: CreatureType::Data,
            attribute: None,
            evolution_targets: Vec::new(),
            active: true,
            boss_eligible,
        }
    }

    fn two_player_game(seed: u64) -> Game {
        let roster = vec![
            entry(1, 1, false),
            entry(2, 2, true),
            entry(3, 2, false),
            entry(4, 3, true),
        ];
        let catalog = MemoryCatalog::new(roster.clone()).with_drops(
            2,
            vec![BossDrop {
                item_id: 501,
                drop_percent: 100,
            }],
        );
        let players = vec![
            Player {
                id: 1,
                name: "Tai".to_string(),
                avatar: None,
                creatures: vec![
                    Creature::from_template(1, &roster[0]).unwrap(),
                    Creature::from_template(2, &roster[0]).unwrap(),
                ],
            },
            Player {
                id: 2,
                name: "Matt".to_string(),
                avatar: None,
                creatures: vec![Creature::from_template(3, &roster[0]).unwrap()],
            },
        ];
        Game::new(Box::new(catalog), players, seed).unwrap()
    }

    #[test]
    fn first_boss_arrives_on_turn_two() {
        let mut game = two_player_game(7);
        assert!(game.state().boss.is_none());

        game.advance_round().unwrap();
        assert_eq!(game.state().turn_count, 2);

        game.advance_round().unwrap();
        let boss = game.state().boss.as_ref().unwrap();
        assert_eq!(boss.spawned_on_turn, 2);
        // Most common living level is 1, so the boss targets level 2.
        assert_eq!(boss.level, 2);
    }

    #[test]
    fn rounds_reset_action_flags_and_advance_the_turn() {
        let mut game = two_player_game(3);
        game.advance_round().unwrap();
        assert_eq!(game.state().turn_count, 2);
        for player in &game.state().players {
            for creature in &player.creatures {
                assert!(!creature.has_acted);
            }
        }
    }

    #[test]
    fn same_seed_replays_the_same_battle() {
        let mut first = two_player_game(12);
        let mut second = two_player_game(12);
        for _ in 0..5 {
            first.advance_round().unwrap();
            second.advance_round().unwrap();
        }
        let a = serde_json::to_string(first.state()).unwrap();
        let b = serde_json::to_string(second.state()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn save_and_load_round_trip_restores_the_battle() {
        let mut game = two_player_game(21);
        game.advance_round().unwrap();
        game.advance_round().unwrap();

        let save = game.save_state();
        let mut restored = two_player_game(0);
        restored.load_state(save);

        assert_eq!(restored.seed(), 21);
        assert_eq!(restored.state().turn_count, game.state().turn_count);
        assert_eq!(
            restored.state().boss.is_some(),
            game.state().boss.is_some()
        );
    }

    #[test]
    fn drain_log_empties_the_buffer() {
        let mut game = two_player_game(2);
        game.advance_round().unwrap();
        game.advance_round().unwrap();
        let drained = game.drain_log();
        assert!(!drained.is_empty());
        assert!(game.drain_log().is_empty());
    }
}
