//! Turn/round controller. Sequences movement, tile-sink and creature
//! phases per player, re-checks the termination condition after every
//! phase, and computes final scores when the game ends.

use std::fmt;
use std::path::PathBuf;

use anyhow::{ensure, Result};

use crate::decision::DecisionProvider;
use crate::entity::PlayerId;
use crate::phases::{creature, movement, placement, sink};
use crate::phases::{CreatureOutcome, MoveAction, PlacementReport, SinkReport};
use crate::rng::RngManager;
use crate::scenario::Scenario;
use crate::snapshot::{GameSnapshot, GameSummary, PlayerStatus, SummaryWriter};
use crate::world::GameWorld;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub max_rounds: u32,
    pub movement_points: u8,
    pub villagers_per_player: u32,
    /// When set, a JSON summary of the finished game is written here.
    pub summary_dir: Option<PathBuf>,
}

impl EngineSettings {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
            max_rounds: scenario.max_rounds,
            movement_points: scenario.movement_points,
            villagers_per_player: scenario.villagers_per_player,
            summary_dir: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_summary_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.summary_dir = Some(dir.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    AllTilesSunk,
    VolcanoErupted,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::AllTilesSunk => write!(f, "All tiles have sunk!"),
            EndReason::VolcanoErupted => write!(f, "Reached maximum rounds (volcano erupts)!"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub reason: EndReason,
    pub rounds: u32,
    pub scores: Vec<PlayerStatus>,
    pub winner: String,
    pub summary_path: Option<PathBuf>,
}

/// Presentation hook points. Every method has an empty default so tests
/// and headless runs can pass a `NullObserver`.
pub trait Observer {
    fn game_started(&mut self, _snapshot: &GameSnapshot) {}
    fn placement_finished(&mut self, _report: &PlacementReport) {}
    fn round_started(&mut self, _round: u32, _snapshot: &GameSnapshot) {}
    fn turn_started(&mut self, _player: &str) {}
    fn movement_finished(&mut self, _player: &str, _actions: &[MoveAction], _snapshot: &GameSnapshot) {
    }
    fn tile_sunk(&mut self, _report: Option<&SinkReport>) {}
    fn creature_resolved(&mut self, _outcome: &CreatureOutcome) {}
    fn game_finished(&mut self, _outcome: &GameOutcome, _snapshot: &GameSnapshot) {}
}

pub struct NullObserver;

impl Observer for NullObserver {}

pub struct Engine {
    settings: EngineSettings,
    rng: RngManager,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            rng: RngManager::new(settings.seed),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Deal a fresh board and seat the scenario's players.
    pub fn create_world(&mut self, scenario: &Scenario) -> GameWorld {
        scenario.build_world(&mut self.rng.stream("board"))
    }

    /// Full session: board setup, placement, then rounds until the island
    /// is gone or the round cap is hit.
    pub fn run(
        &mut self,
        scenario: &Scenario,
        providers: &mut [Box<dyn DecisionProvider>],
        observer: &mut dyn Observer,
    ) -> Result<GameOutcome> {
        ensure!(
            providers.len() == scenario.players.len(),
            "need one decision provider per player ({} players, {} providers)",
            scenario.players.len(),
            providers.len()
        );
        let mut world = self.create_world(scenario);
        observer.game_started(&world.snapshot(0));

        let reports = placement::run(
            &mut world,
            providers,
            self.settings.villagers_per_player,
            &mut self.rng.stream("placement"),
        );
        for report in &reports {
            observer.placement_finished(report);
        }

        let mut outcome = self.play(&mut world, providers, observer);
        if let Some(dir) = &self.settings.summary_dir {
            let summary = GameSummary {
                scenario: self.settings.scenario_name.clone(),
                seed: self.settings.seed,
                finished_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                rounds: outcome.rounds,
                reason: outcome.reason.to_string(),
                players: outcome.scores.clone(),
                winner: outcome.winner.clone(),
            };
            outcome.summary_path = Some(SummaryWriter::new(dir).write(&summary)?);
        }
        Ok(outcome)
    }

    /// Round loop over an already-populated world. Exposed separately so
    /// tests can stage specific board states before play begins.
    pub fn play(
        &mut self,
        world: &mut GameWorld,
        providers: &mut [Box<dyn DecisionProvider>],
        observer: &mut dyn Observer,
    ) -> GameOutcome {
        let mut round = 0u32;
        let reason = 'game: loop {
            if world.board.all_sunk() {
                break 'game EndReason::AllTilesSunk;
            }
            round += 1;
            observer.round_started(round, &world.snapshot(round));

            for seat in 0..world.players().len() {
                if world.board.all_sunk() {
                    break 'game EndReason::AllTilesSunk;
                }
                let player = PlayerId::new(seat);
                let name = world.player(player).name.clone();
                observer.turn_started(&name);

                let actions = movement::run(
                    world,
                    player,
                    providers[seat].as_mut(),
                    self.settings.movement_points,
                );
                observer.movement_finished(&name, &actions, &world.snapshot(round));
                if world.board.all_sunk() {
                    break 'game EndReason::AllTilesSunk;
                }

                let report = sink::run(world, &mut self.rng.stream("sink"));
                observer.tile_sunk(report.as_ref());
                if world.board.all_sunk() {
                    break 'game EndReason::AllTilesSunk;
                }

                let outcome = creature::run(world, &mut self.rng.stream("creature"));
                observer.creature_resolved(&outcome);
            }

            // The eruption takes precedence when the island happens to
            // finish sinking exactly at the round boundary.
            if round >= self.settings.max_rounds {
                break 'game EndReason::VolcanoErupted;
            }
        };

        world.compute_scores();
        let winner = world.player(world.winner()).name.clone();
        let outcome = GameOutcome {
            reason,
            rounds: round,
            scores: world.player_statuses(),
            winner,
            summary_path: None,
        };
        observer.game_finished(&outcome, &world.snapshot(round));
        outcome
    }
}
