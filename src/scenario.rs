//! Scenario files: who is playing, the seed, and the session tunables.
//! Loaded from YAML; a built-in default seats one human against two
//! computer opponents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::board::Board;
use crate::entity::{Control, Player};
use crate::rng::SystemRng;
use crate::world::GameWorld;

fn default_max_rounds() -> u32 {
    20
}

fn default_villagers_per_player() -> u32 {
    10
}

fn default_movement_points() -> u8 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default = "default_villagers_per_player")]
    pub villagers_per_player: u32,
    #[serde(default = "default_movement_points")]
    pub movement_points: u8,
    pub players: Vec<ScenarioPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioPlayer {
    pub name: String,
    #[serde(default)]
    pub control: Control,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario validation error: {0}")]
    Validation(String),
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }
}

impl Scenario {
    /// The out-of-the-box session: one human seat against two computers.
    pub fn default_session(seed: u64) -> Self {
        Self {
            name: "atlantis".to_string(),
            description: Some("Escape from Atlantis".to_string()),
            seed,
            max_rounds: default_max_rounds(),
            villagers_per_player: default_villagers_per_player(),
            movement_points: default_movement_points(),
            players: vec![
                ScenarioPlayer {
                    name: "Human".to_string(),
                    control: Control::Human,
                },
                ScenarioPlayer {
                    name: "Computer1".to_string(),
                    control: Control::Automated,
                },
                ScenarioPlayer {
                    name: "Computer2".to_string(),
                    control: Control::Automated,
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.players.is_empty() {
            return Err(ScenarioError::Validation(
                "at least one player is required".to_string(),
            ));
        }
        if self.villagers_per_player == 0 {
            return Err(ScenarioError::Validation(
                "villagers_per_player must be at least 1".to_string(),
            ));
        }
        if self.movement_points == 0 {
            return Err(ScenarioError::Validation(
                "movement_points must be at least 1".to_string(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(ScenarioError::Validation(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Deal the board and seat the players.
    pub fn build_world(&self, rng: &mut SystemRng<'_>) -> GameWorld {
        let board = Board::generate(rng);
        let players = self
            .players
            .iter()
            .map(|p| Player::new(p.name.clone(), p.control))
            .collect();
        GameWorld::new(board, players)
    }
}
