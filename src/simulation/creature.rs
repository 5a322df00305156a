use serde::{Deserialize, Serialize};

use crate::catalog::repository::CatalogEntry;
use crate::rules::advantage::{Attribute, CreatureType};
use crate::rules::balancing::{creature_stats, BalanceError};

/// Closed vocabulary of transient combat statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTag {
    Provoked,
    Feared,
    Cheered,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Provoked => "provoked",
            StatusTag::Feared => "feared",
            StatusTag::Cheered => "cheered",
        }
    }
}

/// A timed status on one creature. Entries past their expiry turn may
/// linger in storage until the next filtered read; only the filtered view
/// in `systems::status` is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub tag: StatusTag,
    pub expires_on_turn: u64,
}

/// A battle-capable creature instantiated from a catalog template and
/// owned by a player for the whole battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub catalog_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub level: u8,
    pub creature_type: CreatureType,
    pub attribute: Option<Attribute>,
    pub base_power: i32,
    pub power_bonus: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub evolution_targets: Vec<i64>,
    /// Set once a rare evolution path has been taken; blocks further
    /// random evolution.
    pub evolution_locked: bool,
    pub evolution_ready: bool,
    pub has_acted: bool,
    #[serde(default)]
    pub statuses: Vec<StatusEffect>,
    #[serde(default)]
    pub items: Vec<i64>,
    #[serde(default)]
    pub double_xp_token: bool,
}

impl Creature {
    /// Instantiates a battle creature from a catalog template, with stats
    /// from the balancing table at the template's level.
    pub fn from_template(id: u32, template: &CatalogEntry) -> Result<Self, BalanceError> {
        let stats = creature_stats(template.level)?;
        Ok(Self {
            id,
            catalog_id: template.id,
            name: template.name.clone(),
            image: template.image.clone(),
            level: template.level,
            creature_type: template.creature_type,
            attribute: template.attribute,
            base_power: stats.combat_power,
            power_bonus: 0,
            current_hp: stats.hit_points,
            max_hp: stats.hit_points,
            evolution_targets: template.evolution_targets.clone(),
            evolution_locked: false,
            evolution_ready: false,
            has_acted: false,
            statuses: Vec::new(),
            items: Vec::new(),
            double_xp_token: false,
        })
    }

    /// A creature at zero hit points is incapacitated: excluded from
    /// targeting and from world-turn damage until revived externally.
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn combat_power(&self) -> i32 {
        self.base_power + self.power_bonus
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp = (self.current_hp - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CatalogEntry {
        CatalogEntry {
            id: 10,
            name: "Agumon".to_string(),
            image: None,
            level: 1,
            creature_type: CreatureType::Vaccine,
            attribute: Some(Attribute::Fire),
            evolution_targets: vec![20],
            active: true,
            boss_eligible: false,
        }
    }

    #[test]
    fn instantiation_copies_template_and_table_stats() {
        let creature = Creature::from_template(1, &template()).unwrap();
        assert_eq!(creature.catalog_id, 10);
        assert_eq!(creature.current_hp, 3_000);
        assert_eq!(creature.max_hp, 3_000);
        assert_eq!(creature.combat_power(), 1_000);
        assert_eq!(creature.evolution_targets, vec![20]);
    }

    #[test]
    fn damage_clamps_at_zero_and_heal_at_max() {
        let mut creature = Creature::from_template(1, &template()).unwrap();
        creature.take_damage(5_000);
        assert_eq!(creature.current_hp, 0);
        assert!(!creature.is_alive());
        creature.heal(10_000);
        assert_eq!(creature.current_hp, creature.max_hp);
    }

    #[test]
    fn instantiation_rejects_unbalanced_template_level() {
        let mut bad = template();
        bad.level = 99;
        assert!(Creature::from_template(1, &bad).is_err());
    }
}
