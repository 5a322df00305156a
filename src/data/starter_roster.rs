use crate::catalog::memory::MemoryCatalog;
use crate::catalog::repository::{BossDrop, CatalogEntry};
use crate::rules::advantage::{Attribute, CreatureType};

/// Built-in content used when no external catalog database is supplied.
/// Levels follow the balancing table; ids are stable so evolution lines
/// and drop tables can reference them.
pub fn starter_roster() -> Vec<CatalogEntry> {
    fn entry(
        id: i64,
        name: &str,
        level: u8,
        creature_type: CreatureType,
        attribute: Option<Attribute>,
        evolution_targets: Vec<i64>,
        boss_eligible: bool,
    ) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            image: None,
            level,
            creature_type,
            attribute,
            evolution_targets,
            active: true,
            boss_eligible,
        }
    }

    let mut roster = vec![
        // Rookies.
        entry(1, "Agumon", 1, CreatureType::Vaccine, Some(Attribute::Fire), vec![10, 11], false),
        entry(2, "Gabumon", 1, CreatureType::Data, Some(Attribute::Nature), vec![12], false),
        entry(3, "Impmon", 1, CreatureType::Virus, Some(Attribute::Dark), vec![], false),
        entry(4, "Betamon", 1, CreatureType::Virus, Some(Attribute::Water), vec![13], false),
        entry(5, "Patamon", 1, CreatureType::Vaccine, Some(Attribute::Light), vec![14], false),
        // Champions.
        entry(10, "Greymon", 2, CreatureType::Vaccine, Some(Attribute::Fire), vec![20], false),
        entry(11, "GeoGreymon", 2, CreatureType::Vaccine, Some(Attribute::Fire), vec![20, 24], false),
        entry(12, "Garurumon", 2, CreatureType::Vaccine, Some(Attribute::Nature), vec![21], false),
        entry(13, "Seadramon", 2, CreatureType::Data, Some(Attribute::Water), vec![], false),
        entry(14, "Angemon", 2, CreatureType::Vaccine, Some(Attribute::Light), vec![22], false),
        entry(15, "Devimon", 2, CreatureType::Virus, Some(Attribute::Dark), vec![23], true),
        // Ultimates.
        entry(20, "MetalGreymon", 3, CreatureType::Vaccine, Some(Attribute::Fire), vec![30], false),
        entry(21, "WereGarurumon", 3, CreatureType::Vaccine, Some(Attribute::Nature), vec![31], false),
        entry(22, "MagnaAngemon", 3, CreatureType::Vaccine, Some(Attribute::Light), vec![], false),
        entry(23, "Myotismon", 3, CreatureType::Virus, Some(Attribute::Dark), vec![32], true),
        entry(24, "SkullGreymon", 3, CreatureType::Virus, Some(Attribute::Dark), vec![], true),
        // Megas.
        entry(30, "WarGreymon", 4, CreatureType::Vaccine, Some(Attribute::Fire), vec![40], false),
        entry(31, "MetalGarurumon", 4, CreatureType::Data, Some(Attribute::Water), vec![40], false),
        entry(32, "VenomMyotismon", 4, CreatureType::Virus, Some(Attribute::Dark), vec![41], true),
        entry(33, "Machinedramon", 4, CreatureType::Virus, Some(Attribute::Dark), vec![41], true),
        entry(34, "Piedmon", 4, CreatureType::Virus, Some(Attribute::Dark), vec![], true),
        // Beyond.
        entry(40, "Omnimon", 5, CreatureType::Vaccine, Some(Attribute::Light), vec![], false),
        entry(41, "Apocalymon", 5, CreatureType::Virus, Some(Attribute::Dark), vec![], true),
    ];

    // Retired form kept for old saves; never offered as an evolution.
    let mut retired = entry(90, "BlackAgumon", 1, CreatureType::Virus, Some(Attribute::Dark), vec![], false);
    retired.active = false;
    roster.push(retired);

    roster
}

/// Drop tables keyed by boss catalog id. Item ids live in the companion
/// app's item catalog; the engine only moves them into the shared bag.
pub fn starter_drops() -> Vec<(i64, Vec<BossDrop>)> {
    fn table(boss_id: i64) -> (i64, Vec<BossDrop>) {
        (
            boss_id,
            vec![
                BossDrop {
                    item_id: 501,
                    drop_percent: 60,
                },
                BossDrop {
                    item_id: 502,
                    drop_percent: 25,
                },
                BossDrop {
                    item_id: 503,
                    drop_percent: 10,
                },
            ],
        )
    }
    vec![table(15), table(23), table(24), table(32), table(33), table(34), table(41)]
}

/// The default in-memory catalog: roster plus drop tables.
pub fn starter_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new(starter_roster());
    for (boss_id, drops) in starter_drops() {
        catalog = catalog.with_drops(boss_id, drops);
    }
    catalog
}
