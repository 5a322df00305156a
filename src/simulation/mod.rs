pub mod boss;
pub mod creature;
pub mod game;

pub use boss::Boss;
pub use creature::{Creature, StatusEffect, StatusTag};
pub use game::{GameState, Player};
