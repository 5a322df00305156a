// Re-export core modules for use by the binary or other consumers
pub mod catalog;
pub mod core;
pub mod data;
pub mod rules;
pub mod simulation;
pub mod systems;

// Expose the main Game wrapper and types needed for interaction
pub use crate::core::engine::Game;
pub use crate::core::serialization::SaveState;
