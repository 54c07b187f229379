//! The game-state aggregate. Every phase receives a `&mut GameWorld`
//! rather than reaching for ambient globals; the world enforces the
//! villager/tile occupancy invariant at its mutation points.

use crate::board::{Board, GridPos, TileId};
use crate::entity::{Player, PlayerId, Villager, VillagerId, VillagerState};
use crate::snapshot::{BoardCell, BoardSnapshot, GameSnapshot, PlayerStatus};

pub struct GameWorld {
    pub board: Board,
    players: Vec<Player>,
    villagers: Vec<Villager>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Advanced,
    ReachedSafety,
}

impl GameWorld {
    pub fn new(board: Board, players: Vec<Player>) -> Self {
        Self {
            board,
            players,
            villagers: Vec::new(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn villager(&self, id: VillagerId) -> Option<&Villager> {
        self.villagers.get(id.raw() as usize - 1)
    }

    fn villager_mut(&mut self, id: VillagerId) -> Option<&mut Villager> {
        self.villagers.get_mut(id.raw() as usize - 1)
    }

    /// Create a villager on the given tile. Keeps both sides of the
    /// occupancy invariant: the villager's tile ref and the tile's occupant
    /// list. Fails when the tile is sunk or already at capacity.
    pub fn spawn_villager(
        &mut self,
        owner: PlayerId,
        treasure: u8,
        tile_id: TileId,
    ) -> Option<VillagerId> {
        let id = VillagerId::new(self.villagers.len() as u32 + 1);
        let tile = self.board.tile_mut(tile_id)?;
        if !tile.has_room() {
            return None;
        }
        tile.occupants.push(id);
        let distance = tile.kind.distance();
        self.villagers.push(Villager {
            id,
            owner,
            treasure,
            state: VillagerState::OnLand,
            distance_remaining: distance,
            tile: Some(tile_id),
        });
        self.players[owner.index()].villagers.push(id);
        Some(id)
    }

    /// Reduce a villager's remaining distance. Reaching zero makes it safe
    /// immediately, clearing the tile reference and occupancy entry.
    pub fn move_villager(&mut self, id: VillagerId, amount: u8) -> MoveOutcome {
        let Some(villager) = self.villager_mut(id) else {
            return MoveOutcome::Advanced;
        };
        villager.distance_remaining = villager.distance_remaining.saturating_sub(amount);
        if villager.distance_remaining == 0 {
            self.make_safe(id);
            MoveOutcome::ReachedSafety
        } else {
            MoveOutcome::Advanced
        }
    }

    fn make_safe(&mut self, id: VillagerId) {
        let Some(villager) = self.villager_mut(id) else {
            return;
        };
        villager.state = VillagerState::Safe;
        villager.distance_remaining = 0;
        if let Some(tile_id) = villager.tile.take() {
            if let Some(tile) = self.board.tile_mut(tile_id) {
                tile.occupants.retain(|&v| v != id);
            }
        }
    }

    /// Sink a tile: every occupant drops into the water (state change only,
    /// no damage) and the slot becomes permanently empty. Returns the
    /// villagers that went overboard.
    pub fn sink_tile(&mut self, tile_id: TileId) -> Vec<VillagerId> {
        let occupants = self.board.sink(tile_id).unwrap_or_default();
        for &id in &occupants {
            if let Some(villager) = self.villager_mut(id) {
                if villager.state == VillagerState::OnLand {
                    villager.state = VillagerState::InWater;
                    villager.tile = None;
                }
            }
        }
        occupants
    }

    pub fn kill_villager(&mut self, id: VillagerId) {
        if let Some(villager) = self.villager_mut(id) {
            villager.state = VillagerState::Dead;
            villager.tile = None;
        }
    }

    /// A player's villagers that are still on land or in the water,
    /// in creation order.
    pub fn movable_villagers(&self, player: PlayerId) -> Vec<VillagerId> {
        self.players[player.index()]
            .villagers
            .iter()
            .copied()
            .filter(|&id| self.villager(id).is_some_and(Villager::is_movable))
            .collect()
    }

    /// Everyone currently swimming, across all players.
    pub fn villagers_in_water(&self) -> Vec<VillagerId> {
        self.villagers
            .iter()
            .filter(|v| v.state == VillagerState::InWater)
            .map(|v| v.id)
            .collect()
    }

    pub fn villager_position(&self, id: VillagerId) -> Option<GridPos> {
        self.villager(id)
            .and_then(|v| v.tile)
            .and_then(|tile| self.board.locate(tile))
    }

    /// Write each player's final score: the sum of treasure over villagers
    /// that made it to safety.
    pub fn compute_scores(&mut self) {
        for i in 0..self.players.len() {
            let score = self.players[i]
                .villagers
                .iter()
                .filter_map(|&id| self.villager(id))
                .filter(|v| v.state == VillagerState::Safe)
                .map(|v| u32::from(v.treasure))
                .sum();
            self.players[i].score = score;
        }
    }

    /// The seat with the strictly highest score. Ties go to the earliest
    /// player in seating order.
    pub fn winner(&self) -> PlayerId {
        let mut best = 0;
        for (i, player) in self.players.iter().enumerate() {
            if player.score > self.players[best].score {
                best = i;
            }
        }
        PlayerId::new(best)
    }

    pub fn player_statuses(&self) -> Vec<PlayerStatus> {
        self.players
            .iter()
            .map(|player| {
                let count = |state: VillagerState| {
                    player
                        .villagers
                        .iter()
                        .filter_map(|&id| self.villager(id))
                        .filter(|v| v.state == state)
                        .count()
                };
                PlayerStatus {
                    name: player.name.clone(),
                    remaining: count(VillagerState::OnLand) + count(VillagerState::InWater),
                    saved: count(VillagerState::Safe),
                    killed: count(VillagerState::Dead),
                    score: player.score,
                }
            })
            .collect()
    }

    /// Read-only view of the whole game state, for rendering and summaries.
    pub fn snapshot(&self, round: u32) -> GameSnapshot {
        let rows = self
            .board
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, slot)| {
                        let coord = GridPos { row: r, col: c }.to_string();
                        match slot {
                            Some(tile) => BoardCell {
                                coord,
                                kind: Some(tile.kind),
                                occupants: tile.occupants.len(),
                                sunk: false,
                            },
                            None => BoardCell {
                                coord,
                                kind: None,
                                occupants: 0,
                                sunk: true,
                            },
                        }
                    })
                    .collect()
            })
            .collect();
        GameSnapshot {
            round,
            board: BoardSnapshot { rows },
            players: self.player_statuses(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GridPos, TILE_CAPACITY};
    use crate::entity::Control;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world() -> GameWorld {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = Board::generate(&mut rng);
        GameWorld::new(board, vec![Player::new("P1", Control::Automated)])
    }

    #[test]
    fn spawning_respects_capacity() {
        let mut w = world();
        let tile = w.board.occupiable_tiles()[0];
        let owner = PlayerId::new(0);
        for _ in 0..TILE_CAPACITY {
            assert!(w.spawn_villager(owner, 1, tile).is_some());
        }
        assert!(w.spawn_villager(owner, 1, tile).is_none());
        assert_eq!(w.board.tile(tile).unwrap().occupants.len(), TILE_CAPACITY);
    }

    #[test]
    fn occupancy_invariant_is_bidirectional() {
        let mut w = world();
        let tile = w.board.occupiable_tiles()[0];
        let id = w.spawn_villager(PlayerId::new(0), 4, tile).unwrap();
        let villager = w.villager(id).unwrap();
        assert_eq!(villager.tile, Some(tile));
        assert!(w.board.tile(tile).unwrap().occupants.contains(&id));
    }

    #[test]
    fn reaching_safety_clears_tile_reference() {
        let mut w = world();
        let mountain = w.board.tiles_of_kind(crate::board::TileKind::Mountain)[0];
        let id = w.spawn_villager(PlayerId::new(0), 5, mountain).unwrap();
        assert_eq!(w.move_villager(id, 1), MoveOutcome::ReachedSafety);
        let villager = w.villager(id).unwrap();
        assert_eq!(villager.state, VillagerState::Safe);
        assert_eq!(villager.tile, None);
        assert!(!w.board.tile(mountain).unwrap().occupants.contains(&id));
    }

    #[test]
    fn sinking_drops_occupants_into_water() {
        let mut w = world();
        let tile = w.board.occupiable_tiles()[0];
        let id = w.spawn_villager(PlayerId::new(0), 2, tile).unwrap();
        let overboard = w.sink_tile(tile);
        assert_eq!(overboard, vec![id]);
        let villager = w.villager(id).unwrap();
        assert_eq!(villager.state, VillagerState::InWater);
        assert_eq!(villager.tile, None);
        assert_eq!(w.villagers_in_water(), vec![id]);
    }

    #[test]
    fn winner_tie_break_is_first_in_seating_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = Board::generate(&mut rng);
        let mut w = GameWorld::new(
            board,
            vec![
                Player::new("A", Control::Automated),
                Player::new("B", Control::Automated),
            ],
        );
        let mountain = w.board.tiles_of_kind(crate::board::TileKind::Mountain)[0];
        let a = w.spawn_villager(PlayerId::new(0), 4, mountain).unwrap();
        let b = w.spawn_villager(PlayerId::new(1), 4, mountain).unwrap();
        w.move_villager(a, 1);
        w.move_villager(b, 1);
        w.compute_scores();
        assert_eq!(w.players()[0].score, w.players()[1].score);
        assert_eq!(w.winner(), PlayerId::new(0));
    }

    #[test]
    fn snapshot_marks_sunk_cells() {
        let mut w = world();
        let tile = w.board.tile_at(GridPos { row: 0, col: 0 }).unwrap().id;
        w.sink_tile(tile);
        let snapshot = w.snapshot(1);
        let cell = &snapshot.board.rows[0][0];
        assert!(cell.sunk);
        assert_eq!(cell.kind, None);
    }
}
