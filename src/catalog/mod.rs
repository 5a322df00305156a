pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::MemoryCatalog;
pub use repository::{BossDrop, CatalogEntry, CreatureCatalog};
pub use sqlite::SqliteCreatureCatalog;
