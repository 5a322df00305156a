use serde::{Deserialize, Serialize};

use crate::catalog::repository::CatalogEntry;
use crate::rules::balancing::{boss_stats, BalanceError};

/// A live boss encounter. Its calculated power drives both its group
/// attack and damage-received math, decoupled from the template's base
/// numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub catalog_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub level: u8,
    pub current_hp: i32,
    pub max_hp: i32,
    pub calculated_dp: i32,
    pub spawned_on_turn: u64,
    pub is_defeated: bool,
}

impl Boss {
    /// Instantiates a boss from a template using the boss balancing
    /// variant at the template's level.
    pub fn from_template(template: &CatalogEntry, current_turn: u64) -> Result<Self, BalanceError> {
        let stats = boss_stats(template.level)?;
        Ok(Self {
            catalog_id: template.id,
            name: template.name.clone(),
            image: template.image.clone(),
            level: template.level,
            current_hp: stats.hit_points,
            max_hp: stats.hit_points,
            calculated_dp: stats.combat_power,
            spawned_on_turn: current_turn,
            is_defeated: false,
        })
    }

    /// Once defeated a boss never attacks or is targeted again until a new
    /// one spawns.
    pub fn is_targetable(&self) -> bool {
        !self.is_defeated && self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp = (self.current_hp - amount).max(0);
        if self.current_hp == 0 {
            self.is_defeated = true;
        }
    }
}
