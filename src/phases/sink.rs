//! Tile-sink phase: one tile goes under per player-turn, picked uniformly
//! from the most endangered kind still standing.

use rand::seq::SliceRandom;

use crate::board::{GridPos, TileId, TileKind};
use crate::entity::VillagerId;
use crate::rng::SystemRng;
use crate::world::GameWorld;

#[derive(Debug, Clone)]
pub struct SinkReport {
    pub tile: TileId,
    pub kind: TileKind,
    pub coord: GridPos,
    /// Villagers washed into the water, with their owners' names.
    pub overboard: Vec<(VillagerId, String)>,
}

/// Sink one tile. Beaches go before forests, forests before mountains;
/// the volcano only sinks once nothing else is left. Returns `None` when
/// the island is already gone - a no-op, not an error.
pub fn run(world: &mut GameWorld, rng: &mut SystemRng<'_>) -> Option<SinkReport> {
    for kind in TileKind::SINK_ORDER {
        let tiles = world.board.tiles_of_kind(kind);
        if let Some(&tile) = tiles.choose(rng) {
            let coord = world.board.locate(tile)?;
            let overboard = world
                .sink_tile(tile)
                .into_iter()
                .map(|id| {
                    let owner = world
                        .villager(id)
                        .map(|v| world.player(v.owner).name.clone())
                        .unwrap_or_default();
                    (id, owner)
                })
                .collect();
            return Some(SinkReport {
                tile,
                kind,
                coord,
                overboard,
            });
        }
    }
    None
}
