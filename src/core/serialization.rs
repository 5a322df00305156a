use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::simulation::game::GameState;

/// Save state capturing one running battle plus the seed that drives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default = "default_save_version")]
    pub version: u32,
    pub seed: u64,
    pub state: GameState,
}

fn default_save_version() -> u32 {
    1
}

impl SaveState {
    pub fn new(seed: u64, state: GameState) -> Self {
        Self {
            version: default_save_version(),
            seed,
            state,
        }
    }
}

/// Serialize a save state into JSON for persistence.
pub fn save_state_to_json(state: &SaveState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

/// Deserialize JSON back into a save state.
pub fn load_state_from_json(data: &str) -> serde_json::Result<SaveState> {
    serde_json::from_str(data)
}

/// Write a save state to a file path.
pub fn save_state_to_path<P: AsRef<Path>>(state: &SaveState, path: P) -> std::io::Result<()> {
    let json = save_state_to_json(state)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Read a save state from a file path.
pub fn load_state_from_path<P: AsRef<Path>>(path: P) -> std::io::Result<SaveState> {
    let data = fs::read_to_string(&path)?;
    load_state_from_json(&data).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
