//! Island board: a fixed 3x5 grid of tiles that sink one by one. The
//! geometric center is always the volcano; the other fourteen slots are
//! dealt from a fixed pool of beach, forest and mountain tiles.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::VillagerId;

pub const ROWS: usize = 3;
pub const COLS: usize = 5;
pub const TILE_CAPACITY: usize = 3;
pub const COL_LETTERS: [char; COLS] = ['A', 'B', 'C', 'D', 'E'];

/// Tile pool dealt onto the non-volcano slots at generation time.
const TILE_POOL: [(TileKind, usize); 3] = [
    (TileKind::Beach, 7),
    (TileKind::Forest, 4),
    (TileKind::Mountain, 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Beach,
    Forest,
    Mountain,
    Volcano,
}

impl TileKind {
    /// Moves a villager placed here needs to reach safety.
    pub fn distance(self) -> u8 {
        match self {
            TileKind::Beach => 3,
            TileKind::Forest => 2,
            TileKind::Mountain | TileKind::Volcano => 1,
        }
    }

    pub fn letter(self) -> char {
        match self {
            TileKind::Beach => 'B',
            TileKind::Forest => 'F',
            TileKind::Mountain => 'M',
            TileKind::Volcano => 'V',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Beach => "beach",
            TileKind::Forest => "forest",
            TileKind::Mountain => "mountain",
            TileKind::Volcano => "volcano",
        }
    }

    /// Sink order: fragile low-lying tiles go first, the volcano only once
    /// it is the last kind standing.
    pub const SINK_ORDER: [TileKind; 4] = [
        TileKind::Beach,
        TileKind::Forest,
        TileKind::Mountain,
        TileKind::Volcano,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(u8);

impl TileId {
    pub fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid position, displayed as a column letter plus 1-based row (`A1`..`E3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    /// Parse user input like `b2` into a grid position. Returns `None` for
    /// anything malformed or out of range.
    pub fn parse(input: &str) -> Option<GridPos> {
        let coord = input.trim().to_ascii_uppercase();
        let mut chars = coord.chars();
        let col_letter = chars.next()?;
        let col = COL_LETTERS.iter().position(|&c| c == col_letter)?;
        let row_number: usize = chars.as_str().parse().ok()?;
        if row_number < 1 || row_number > ROWS {
            return None;
        }
        Some(GridPos {
            row: row_number - 1,
            col,
        })
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COL_LETTERS[self.col], self.row + 1)
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub occupants: Vec<VillagerId>,
}

impl Tile {
    fn new(id: TileId, kind: TileKind) -> Self {
        Self {
            id,
            kind,
            occupants: Vec::new(),
        }
    }

    pub fn has_room(&self) -> bool {
        self.occupants.len() < TILE_CAPACITY
    }
}

/// The island grid. A `None` slot is a sunk tile and never comes back.
pub struct Board {
    slots: [[Option<Tile>; COLS]; ROWS],
}

impl Board {
    /// Deal a fresh island: volcano in the center, the rest of the pool
    /// shuffled uniformly across the remaining slots. Ids run row-major
    /// from 1.
    pub fn generate(rng: &mut impl Rng) -> Board {
        let mut pool: Vec<TileKind> = TILE_POOL
            .iter()
            .flat_map(|&(kind, count)| std::iter::repeat(kind).take(count))
            .collect();
        pool.shuffle(rng);

        let mut slots: [[Option<Tile>; COLS]; ROWS] = Default::default();
        let mut next_id = 1u8;
        for (r, row) in slots.iter_mut().enumerate() {
            for (c, slot) in row.iter_mut().enumerate() {
                let kind = if r == ROWS / 2 && c == COLS / 2 {
                    TileKind::Volcano
                } else {
                    // pool has exactly 14 entries, one per non-center slot
                    pool.pop().unwrap_or(TileKind::Beach)
                };
                *slot = Some(Tile::new(TileId(next_id), kind));
                next_id += 1;
            }
        }
        Board { slots }
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.slots
            .iter()
            .flatten()
            .filter_map(|slot| slot.as_ref())
            .find(|tile| tile.id == id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .iter_mut()
            .flatten()
            .filter_map(|slot| slot.as_mut())
            .find(|tile| tile.id == id)
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        self.slots.get(pos.row)?.get(pos.col)?.as_ref()
    }

    pub fn locate(&self, id: TileId) -> Option<GridPos> {
        for (r, row) in self.slots.iter().enumerate() {
            for (c, slot) in row.iter().enumerate() {
                if slot.as_ref().is_some_and(|tile| tile.id == id) {
                    return Some(GridPos { row: r, col: c });
                }
            }
        }
        None
    }

    /// Ids of unsunk tiles with room for another villager, in grid order.
    pub fn occupiable_tiles(&self) -> Vec<TileId> {
        self.tiles()
            .filter(|tile| tile.has_room())
            .map(|tile| tile.id)
            .collect()
    }

    pub fn tiles_of_kind(&self, kind: TileKind) -> Vec<TileId> {
        self.tiles()
            .filter(|tile| tile.kind == kind)
            .map(|tile| tile.id)
            .collect()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().flatten().filter_map(|slot| slot.as_ref())
    }

    pub fn rows(&self) -> &[[Option<Tile>; COLS]; ROWS] {
        &self.slots
    }

    pub fn all_sunk(&self) -> bool {
        self.tiles().next().is_none()
    }

    /// Remove the tile from the board and return its former occupants.
    /// The caller is responsible for dropping them into the water.
    pub fn sink(&mut self, id: TileId) -> Option<Vec<VillagerId>> {
        let pos = self.locate(id)?;
        let tile = self.slots[pos.row][pos.col].take()?;
        Some(tile.occupants)
    }
}
