//! Serializable views of the game state, plus the end-of-game summary
//! writer. Rendering and summaries consume these types only, never the
//! world directly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::TileKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCell {
    pub coord: String,
    /// `None` once the tile has sunk.
    pub kind: Option<TileKind>,
    pub occupants: usize,
    pub sunk: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Vec<Vec<BoardCell>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub name: String,
    pub remaining: usize,
    pub saved: usize,
    pub killed: usize,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub round: u32,
    pub board: BoardSnapshot,
    pub players: Vec<PlayerStatus>,
}

/// Final record of a finished session, written as JSON when a summary
/// directory is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub scenario: String,
    pub seed: u64,
    pub finished_at: String,
    pub rounds: u32,
    pub reason: String,
    pub players: Vec<PlayerStatus>,
    pub winner: String,
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to write summary: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct SummaryWriter {
    output_dir: PathBuf,
}

impl SummaryWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn write(&self, summary: &GameSummary) -> Result<PathBuf, SummaryError> {
        fs::create_dir_all(&self.output_dir)?;
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = self
            .output_dir
            .join(format!("{}_{stamp}.json", summary.scenario));
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}
