//! The per-turn phases: placement at setup, then movement, tile-sink and
//! creature attack per player-turn. Each phase mutates the world through
//! its aggregate API and returns a report for rendering.

pub mod creature;
pub mod movement;
pub mod placement;
pub mod sink;

pub use creature::CreatureOutcome;
pub use movement::MoveAction;
pub use placement::{PlacementRecord, PlacementReport};
pub use sink::SinkReport;
