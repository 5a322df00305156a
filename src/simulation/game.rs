use serde::{Deserialize, Serialize};

use crate::simulation::boss::Boss;
use crate::simulation::creature::Creature;

/// A turn participant. Creature ownership never changes during a battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub avatar: Option<String>,
    pub creatures: Vec<Creature>,
}

/// Aggregate root for one running battle: players, turn counters, the
/// active boss and the shared loot bag. Every engine operation mutates
/// this state in place; no other component keeps a mutable handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub active_player: usize,
    pub turn_count: u64,
    pub boss: Option<Boss>,
    /// Turn the last boss fell; 0 means no boss has ever been defeated.
    pub last_boss_defeated_turn: u64,
    pub bosses_defeated: u32,
    #[serde(default)]
    pub item_bag: Vec<i64>,
    #[serde(default)]
    pub log: Vec<String>,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            active_player: 0,
            turn_count: 1,
            boss: None,
            last_boss_defeated_turn: 0,
            bosses_defeated: 0,
            item_bag: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn living_creature_count(&self) -> usize {
        self.players
            .iter()
            .flat_map(|player| player.creatures.iter())
            .filter(|creature| creature.is_alive())
            .count()
    }

    pub fn living_creatures_mut(&mut self) -> impl Iterator<Item = &mut Creature> + '_ {
        self.players
            .iter_mut()
            .flat_map(|player| player.creatures.iter_mut())
            .filter(|creature| creature.is_alive())
    }

    /// Every creature owned by a player other than `player_idx` that is
    /// still standing.
    pub fn living_enemies_of(&self, player_idx: usize) -> Vec<&Creature> {
        self.players
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != player_idx)
            .flat_map(|(_, player)| player.creatures.iter())
            .filter(|creature| creature.is_alive())
            .collect()
    }

    pub fn creature_by_id_mut(&mut self, creature_id: u32) -> Option<&mut Creature> {
        self.players
            .iter_mut()
            .flat_map(|player| player.creatures.iter_mut())
            .find(|creature| creature.id == creature_id)
    }

    pub fn push_log(&mut self, entry: String) {
        self.log.push(entry);
    }
}
