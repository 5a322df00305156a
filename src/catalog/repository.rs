use serde::{Deserialize, Serialize};

use crate::rules::advantage::{Attribute, CreatureType};

/// Immutable creature template as supplied by the catalog service. The
/// engine copies template data into live instances at creation time and
/// never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub level: u8,
    pub creature_type: CreatureType,
    pub attribute: Option<Attribute>,
    /// Authored evolution line; empty means unconstrained.
    #[serde(default)]
    pub evolution_targets: Vec<i64>,
    pub active: bool,
    pub boss_eligible: bool,
}

/// One row of a boss's drop table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossDrop {
    pub item_id: i64,
    pub drop_percent: u8,
}

/// Read-only lookup seam. The engine makes no assumption about the storage
/// technology behind these calls.
pub trait CreatureCatalog {
    fn list_creatures(&self) -> Result<Vec<CatalogEntry>, Box<dyn std::error::Error>>;
    fn creature(&self, id: i64) -> Result<Option<CatalogEntry>, Box<dyn std::error::Error>>;
    fn boss_drops(&self, boss_id: i64) -> Result<Vec<BossDrop>, Box<dyn std::error::Error>>;
}
