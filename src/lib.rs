//! A turn-based sinking-island rescue game. The board loses one tile per
//! player-turn while players race to move their villagers to safety;
//! safe villagers score their treasure value at game end.

pub mod board;
pub mod decision;
pub mod engine;
pub mod entity;
pub mod phases;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod world;

pub use engine::{EndReason, Engine, EngineSettings, GameOutcome, NullObserver, Observer};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::GameWorld;
