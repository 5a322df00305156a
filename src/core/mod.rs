pub mod engine;
pub mod serialization;

pub use engine::Game;
pub use serialization::{
    load_state_from_json, load_state_from_path, save_state_to_json, save_state_to_path, SaveState,
};
