use atlantis::entity::Control;
use atlantis::scenario::ScenarioLoader;

fn loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn loads_the_bundled_three_seat_scenario() {
    let scenario = loader().load("scenarios/three_seats.yaml").unwrap();
    assert_eq!(scenario.name, "three_seats");
    assert_eq!(scenario.seed, 2024);
    assert_eq!(scenario.players.len(), 3);
    assert_eq!(scenario.players[0].control, Control::Human);
    assert_eq!(scenario.players[1].control, Control::Automated);
}

#[test]
fn loads_the_all_automated_scenario_with_defaults() {
    let scenario = loader().load("scenarios/all_automated.yaml").unwrap();
    assert_eq!(scenario.max_rounds, 20);
    assert_eq!(scenario.villagers_per_player, 10);
    assert_eq!(scenario.movement_points, 3);
    assert!(scenario
        .players
        .iter()
        .all(|p| p.control == Control::Automated));
}

#[test]
fn missing_file_reports_the_path() {
    let err = loader().load("scenarios/nope.yaml").unwrap_err();
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn built_world_matches_the_roster() {
    let scenario = loader().load("scenarios/three_seats.yaml").unwrap();
    let mut mgr = atlantis::rng::RngManager::new(scenario.seed);
    let world = scenario.build_world(&mut mgr.stream("board"));
    assert_eq!(world.players().len(), 3);
    assert_eq!(world.players()[0].name, "Human");
    assert_eq!(world.board.tiles().count(), 15);
}
