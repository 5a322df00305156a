pub mod agent;
pub mod boss_director;
pub mod evolution;
pub mod rewards;
pub mod status;
pub mod world_turn;

pub use agent::{choose_actor, decide, Decision};
pub use boss_director::{most_common_level, select_boss_template, should_spawn, spawn_boss};
pub use evolution::{
    apply_evolution, resolve_evolution, EvolutionOutcome, EvolveError, DISPLAY_POOL_MIN,
};
pub use rewards::roll_drops;
pub use status::{active_statuses, attach, has_status, purge_expired};
pub use world_turn::{resolve_world_turn, WorldTurnReport};
