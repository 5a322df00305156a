pub mod starter_roster;

pub use starter_roster::{starter_catalog, starter_drops, starter_roster};
