//! Villagers and the players who own them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VillagerId(u32);

impl VillagerId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VillagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VillagerState {
    OnLand,
    InWater,
    Safe,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Villager {
    pub id: VillagerId,
    pub owner: PlayerId,
    /// Points this villager is worth once safe, fixed at creation (1-6).
    pub treasure: u8,
    pub state: VillagerState,
    /// Movement units still needed to reach safety. Meaningful only while
    /// on land or in the water; hitting zero flips the state to `Safe`.
    pub distance_remaining: u8,
    /// Present exactly while the villager stands on an unsunk tile.
    pub tile: Option<TileId>,
}

impl Villager {
    pub fn is_movable(&self) -> bool {
        matches!(self.state, VillagerState::OnLand | VillagerState::InWater)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(usize);

impl PlayerId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Who supplies a seat's decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Human,
    #[default]
    Automated,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub control: Control,
    pub villagers: Vec<VillagerId>,
    /// Sum of treasure over safe villagers, written once at game end.
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, control: Control) -> Self {
        Self {
            name: name.into(),
            control,
            villagers: Vec::new(),
            score: 0,
        }
    }
}
