use atlantis::board::Board;
use atlantis::decision::{DecisionProvider, HeuristicProvider};
use atlantis::engine::{EndReason, Engine, EngineSettings, NullObserver, Observer};
use atlantis::entity::{Control, Player};
use atlantis::phases::SinkReport;
use atlantis::rng::RngManager;
use atlantis::scenario::{Scenario, ScenarioPlayer};
use atlantis::world::GameWorld;

fn automated_scenario(seed: u64, players: usize) -> Scenario {
    let mut scenario = Scenario::default_session(seed);
    scenario.players = (0..players)
        .map(|i| ScenarioPlayer {
            name: format!("Computer{}", i + 1),
            control: Control::Automated,
        })
        .collect();
    scenario
}

fn heuristics(count: usize) -> Vec<Box<dyn DecisionProvider>> {
    (0..count)
        .map(|_| Box::new(HeuristicProvider::new()) as Box<dyn DecisionProvider>)
        .collect()
}

#[test]
fn automated_playthrough_terminates_with_scores_for_everyone() {
    let scenario = automated_scenario(42, 3);
    let mut providers = heuristics(3);
    let mut engine = Engine::new(EngineSettings::from_scenario(&scenario));
    let outcome = engine
        .run(&scenario, &mut providers, &mut NullObserver)
        .unwrap();

    assert!(outcome.rounds <= 20);
    assert_eq!(outcome.scores.len(), 3);
    for status in &outcome.scores {
        assert_eq!(status.remaining + status.saved + status.killed, 10);
    }
    assert!(outcome
        .scores
        .iter()
        .any(|status| status.name == outcome.winner));
}

#[test]
fn identical_seeds_reproduce_identical_games() {
    let run = |seed: u64| {
        let scenario = automated_scenario(seed, 3);
        let mut providers = heuristics(3);
        let mut engine = Engine::new(EngineSettings::from_scenario(&scenario));
        engine
            .run(&scenario, &mut providers, &mut NullObserver)
            .unwrap()
    };
    let a = run(7);
    let b = run(7);
    assert_eq!(a.reason, b.reason);
    assert_eq!(a.rounds, b.rounds);
    assert_eq!(a.winner, b.winner);
    for (x, y) in a.scores.iter().zip(&b.scores) {
        assert_eq!(x.score, y.score);
        assert_eq!(x.saved, y.saved);
        assert_eq!(x.killed, y.killed);
    }
}

#[test]
fn several_seeds_all_terminate() {
    for seed in [1, 2, 3, 99, 12345] {
        let scenario = automated_scenario(seed, 3);
        let mut providers = heuristics(3);
        let mut engine = Engine::new(EngineSettings::from_scenario(&scenario));
        let outcome = engine
            .run(&scenario, &mut providers, &mut NullObserver)
            .unwrap();
        assert!(outcome.rounds <= 20, "seed {seed} ran too long");
    }
}

/// Records the phase sequence so ordering can be asserted.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl Observer for EventLog {
    fn turn_started(&mut self, player: &str) {
        self.events.push(format!("turn:{player}"));
    }

    fn tile_sunk(&mut self, report: Option<&SinkReport>) {
        match report {
            Some(r) => self.events.push(format!("sink:{}", r.tile)),
            None => self.events.push("sink:none".to_string()),
        }
    }

    fn creature_resolved(&mut self, _outcome: &atlantis::phases::CreatureOutcome) {
        self.events.push("creature".to_string());
    }
}

#[test]
fn sinking_the_last_tile_ends_the_game_before_further_phases() {
    let mut mgr = RngManager::new(3);
    let board = Board::generate(&mut mgr.stream("board"));
    let mut world = GameWorld::new(
        board,
        vec![
            Player::new("Computer1", Control::Automated),
            Player::new("Computer2", Control::Automated),
        ],
    );
    // Leave exactly one tile standing.
    let ids: Vec<_> = world.board.tiles().map(|t| t.id).collect();
    for &id in &ids[..ids.len() - 1] {
        world.sink_tile(id);
    }

    let settings = EngineSettings {
        scenario_name: "staged".into(),
        seed: 3,
        max_rounds: 20,
        movement_points: 3,
        villagers_per_player: 10,
        summary_dir: None,
    };
    let mut engine = Engine::new(settings);
    let mut providers = heuristics(2);
    let mut log = EventLog::default();
    let outcome = engine.play(&mut world, &mut providers, &mut log);

    assert_eq!(outcome.reason, EndReason::AllTilesSunk);
    assert_eq!(outcome.rounds, 1);
    // The first player's sink phase removed the last tile; no creature
    // phase and no second turn followed.
    assert_eq!(log.events.last().map(String::as_str), Some(&*format!("sink:{}", ids[ids.len() - 1])));
    assert!(!log.events.contains(&"creature".to_string()));
    assert!(!log.events.contains(&"turn:Computer2".to_string()));
}

#[test]
fn round_cap_ends_the_game_as_an_eruption() {
    let mut mgr = RngManager::new(4);
    let board = Board::generate(&mut mgr.stream("board"));
    // A single player only sinks one tile per round, so two rounds cannot
    // drown the island.
    let mut world = GameWorld::new(board, vec![Player::new("Computer1", Control::Automated)]);
    let settings = EngineSettings {
        scenario_name: "staged".into(),
        seed: 4,
        max_rounds: 2,
        movement_points: 3,
        villagers_per_player: 10,
        summary_dir: None,
    };
    let mut engine = Engine::new(settings);
    let mut providers = heuristics(1);
    let outcome = engine.play(&mut world, &mut providers, &mut NullObserver);
    assert_eq!(outcome.reason, EndReason::VolcanoErupted);
    assert_eq!(outcome.rounds, 2);
}

#[test]
fn provider_count_mismatch_is_an_error() {
    let scenario = automated_scenario(1, 3);
    let mut providers = heuristics(2);
    let mut engine = Engine::new(EngineSettings::from_scenario(&scenario));
    assert!(engine
        .run(&scenario, &mut providers, &mut NullObserver)
        .is_err());
}

#[test]
fn summary_file_is_written_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = automated_scenario(21, 2);
    let settings = EngineSettings::from_scenario(&scenario).with_summary_dir(dir.path());
    let mut providers = heuristics(2);
    let mut engine = Engine::new(settings);
    let outcome = engine
        .run(&scenario, &mut providers, &mut NullObserver)
        .unwrap();
    let path = outcome.summary_path.expect("summary path set");
    let data = std::fs::read_to_string(path).unwrap();
    assert!(data.contains("\"winner\""));
    assert!(data.contains("\"seed\": 21"));
}
