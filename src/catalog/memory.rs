use crate::catalog::repository::{BossDrop, CatalogEntry, CreatureCatalog};

/// Vec-backed catalog used by tests and the demo binary.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    entries: Vec<CatalogEntry>,
    drops: Vec<(i64, Vec<BossDrop>)>,
}

impl MemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            drops: Vec::new(),
        }
    }

    pub fn with_drops(mut self, boss_id: i64, drops: Vec<BossDrop>) -> Self {
        self.drops.push((boss_id, drops));
        self
    }
}

impl CreatureCatalog for MemoryCatalog {
    fn list_creatures(&self) -> Result<Vec<CatalogEntry>, Box<dyn std::error::Error>> {
        Ok(self.entries.clone())
    }

    fn creature(&self, id: i64) -> Result<Option<CatalogEntry>, Box<dyn std::error::Error>> {
        Ok(self.entries.iter().find(|entry| entry.id == id).cloned())
    }

    fn boss_drops(&self, boss_id: i64) -> Result<Vec<BossDrop>, Box<dyn std::error::Error>> {
        Ok(self
            .drops
            .iter()
            .find(|(id, _)| *id == boss_id)
            .map(|(_, drops)| drops.clone())
            .unwrap_or_default())
    }
}
