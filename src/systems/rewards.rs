use rand::Rng;

use crate::catalog::repository::BossDrop;

/// Rolls a defeated boss's drop table. Each entry is an independent
/// percentile check, so one kill can pay out several items or none.
pub fn roll_drops(drops: &[BossDrop], rng: &mut impl Rng) -> Vec<i64> {
    let mut awarded = Vec::new();
    for drop in drops {
        let roll = rng.gen_range(1..=100u32);
        if roll <= u32::from(drop.drop_percent) {
            awarded.push(drop.item_id);
        }
    }
    awarded
}
