use std::path::Path;
use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use crate::catalog::repository::{BossDrop, CatalogEntry, CreatureCatalog};
use crate::rules::advantage::{Attribute, CreatureType};

/// Sqlite-backed catalog. Bootstraps its own schema so a fresh file works
/// out of the box; content authoring tools own the real data.
pub struct SqliteCreatureCatalog {
    conn: Connection,
}

impl SqliteCreatureCatalog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open(path)?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn insert_entry(&self, entry: &CatalogEntry) -> Result<(), Box<dyn std::error::Error>> {
        let targets = entry
            .evolution_targets
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.conn.execute(
            "INSERT OR REPLACE INTO creature\
                (id, name, image, level, creature_type, attribute, evolution_targets,\
                 is_active, is_boss_eligible)\
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.id,
                entry.name,
                entry.image,
                i64::from(entry.level),
                entry.creature_type.as_str(),
                entry.attribute.map(|attribute| attribute.as_str()),
                targets,
                entry.active as i64,
                entry.boss_eligible as i64,
            ],
        )?;
        Ok(())
    }

    pub fn insert_drop(
        &self,
        boss_id: i64,
        drop: &BossDrop,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.conn.execute(
            "INSERT OR REPLACE INTO boss_drop (boss_id, item_id, drop_percent)\
             VALUES (?1, ?2, ?3)",
            params![boss_id, drop.item_id, i64::from(drop.drop_percent)],
        )?;
        Ok(())
    }
}

fn ensure_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS creature (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT,
            level INTEGER NOT NULL,
            creature_type TEXT NOT NULL,
            attribute TEXT,
            evolution_targets TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1,
            is_boss_eligible INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS boss_drop (
            boss_id INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            drop_percent INTEGER NOT NULL,
            PRIMARY KEY (boss_id, item_id)
        );",
    )
}

type RawCreatureRow = (
    i64,
    String,
    Option<String>,
    i64,
    String,
    Option<String>,
    String,
    i64,
    i64,
);

fn row_to_raw(row: &rusqlite::Row) -> rusqlite::Result<RawCreatureRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn raw_to_entry(raw: RawCreatureRow) -> Result<CatalogEntry, Box<dyn std::error::Error>> {
    let (id, name, image, level, type_raw, attribute_raw, targets_raw, active, boss_eligible) = raw;
    let level = u8::try_from(level)
        .map_err(|_| format!("level {} out of range for creature {}", level, id))?;
    let creature_type = CreatureType::from_str(&type_raw)?;
    let attribute = match attribute_raw {
        Some(raw) => Some(Attribute::from_str(&raw)?),
        None => None,
    };
    Ok(CatalogEntry {
        id,
        name,
        image,
        level,
        creature_type,
        attribute,
        evolution_targets: parse_targets(&targets_raw)?,
        active: active != 0,
        boss_eligible: boss_eligible != 0,
    })
}

fn parse_targets(raw: &str) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    raw.split(',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| format!("bad evolution target id: {}", part).into())
        })
        .collect()
}

impl CreatureCatalog for SqliteCreatureCatalog {
    fn list_creatures(&self) -> Result<Vec<CatalogEntry>, Box<dyn std::error::Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image, level, creature_type, attribute, evolution_targets, \
                    is_active, is_boss_eligible \
             FROM creature ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_raw)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(raw_to_entry(row?)?);
        }
        Ok(entries)
    }

    fn creature(&self, id: i64) -> Result<Option<CatalogEntry>, Box<dyn std::error::Error>> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, name, image, level, creature_type, attribute, evolution_targets, \
                        is_active, is_boss_eligible \
                 FROM creature WHERE id = ?1",
                params![id],
                row_to_raw,
            )
            .optional()?;
        match raw {
            Some(raw) => Ok(Some(raw_to_entry(raw)?)),
            None => Ok(None),
        }
    }

    fn boss_drops(&self, boss_id: i64) -> Result<Vec<BossDrop>, Box<dyn std::error::Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id, drop_percent FROM boss_drop WHERE boss_id = ?1 ORDER BY item_id",
        )?;
        let rows = stmt.query_map(params![boss_id], |row| {
            let item_id: i64 = row.get(0)?;
            let percent: i64 = row.get(1)?;
            Ok((item_id, percent))
        })?;
        let mut drops = Vec::new();
        for row in rows {
            let (item_id, percent) = row?;
            let drop_percent = u8::try_from(percent)
                .map_err(|_| format!("drop percent {} out of range for item {}", percent, item_id))?;
            drops.push(BossDrop {
                item_id,
                drop_percent,
            });
        }
        Ok(drops)
    }
}
