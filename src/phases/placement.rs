//! Initial placement: each player in seat order puts their villagers on
//! the island, one at a time, bounded by tile capacity.

use rand::Rng;

use crate::board::{GridPos, TileId, TileKind};
use crate::decision::{DecisionProvider, PlacementContext, PlacementOption};
use crate::entity::{PlayerId, VillagerId};
use crate::rng::SystemRng;
use crate::world::GameWorld;

#[derive(Debug, Clone)]
pub struct PlacementRecord {
    pub villager: VillagerId,
    pub treasure: u8,
    pub tile: TileId,
    pub kind: TileKind,
    pub coord: GridPos,
}

#[derive(Debug, Clone)]
pub struct PlacementReport {
    pub player: String,
    pub records: Vec<PlacementRecord>,
    /// Set when placement stopped early because no tile had room left.
    pub exhausted: bool,
}

/// Place `villagers_per_player` villagers for every seat. Treasure values
/// are drawn uniformly from 1-6; the provider picks the tile (or the phase
/// picks one uniformly when the provider defers or the seat asked for
/// random placement). Runs out of room benignly: the report notes it and
/// the remaining villagers are simply never created.
pub fn run(
    world: &mut GameWorld,
    providers: &mut [Box<dyn DecisionProvider>],
    villagers_per_player: u32,
    rng: &mut SystemRng<'_>,
) -> Vec<PlacementReport> {
    let mut reports = Vec::with_capacity(world.players().len());
    for seat in 0..world.players().len() {
        let player = PlayerId::new(seat);
        let name = world.player(player).name.clone();
        let mut records = Vec::new();
        let mut exhausted = false;

        let random_all = providers[seat].prefers_random_placement();
        for _ in 0..villagers_per_player {
            let treasure = rng.gen_range(1..=6);
            let options = occupiable_options(world);
            if options.is_empty() {
                exhausted = true;
                break;
            }

            let chosen = if random_all {
                None
            } else {
                let snapshot = world.snapshot(0);
                let ctx = PlacementContext {
                    player: &name,
                    board: &snapshot.board,
                    options: &options,
                };
                providers[seat].choose_placement_tile(&ctx, rng)
            };
            let tile = match chosen {
                Some(id) if options.iter().any(|o| o.tile == id) => id,
                _ => options[rng.gen_range(0..options.len())].tile,
            };

            if let Some(id) = world.spawn_villager(player, treasure, tile) {
                let option = options
                    .iter()
                    .find(|o| o.tile == tile)
                    .cloned();
                if let Some(option) = option {
                    records.push(PlacementRecord {
                        villager: id,
                        treasure,
                        tile,
                        kind: option.kind,
                        coord: option.coord,
                    });
                }
            }
        }

        reports.push(PlacementReport {
            player: name,
            records,
            exhausted,
        });
    }
    reports
}

fn occupiable_options(world: &GameWorld) -> Vec<PlacementOption> {
    world
        .board
        .occupiable_tiles()
        .into_iter()
        .filter_map(|id| {
            let tile = world.board.tile(id)?;
            let coord = world.board.locate(id)?;
            Some(PlacementOption {
                tile: id,
                coord,
                kind: tile.kind,
            })
        })
        .collect()
}
