use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use atlantis::{
    decision::{DecisionProvider, HeuristicProvider, InteractiveProvider},
    engine::{Engine, EngineSettings, NullObserver},
    entity::Control,
    render::ConsoleUi,
    scenario::{Scenario, ScenarioLoader},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Escape from Atlantis - a sinking-island rescue game")]
struct Cli {
    /// Path to a scenario YAML file (defaults to 1 human vs 2 computers)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run every seat automated, ignoring human control tags
    #[arg(long)]
    auto: bool,

    /// Directory for the end-of-game JSON summary
    #[arg(long)]
    summary_dir: Option<PathBuf>,

    /// Suppress the narrated output (final result only)
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::default_session(cli.seed.unwrap_or_else(rand::random)),
    };

    let mut settings = EngineSettings::from_scenario(&scenario);
    if let Some(seed) = cli.seed {
        settings = settings.with_seed(seed);
    }
    if let Some(dir) = &cli.summary_dir {
        settings = settings.with_summary_dir(dir.clone());
    }

    let mut providers: Vec<Box<dyn DecisionProvider>> = scenario
        .players
        .iter()
        .map(|player| match player.control {
            Control::Human if !cli.auto => {
                Box::new(InteractiveProvider::stdio()) as Box<dyn DecisionProvider>
            }
            _ => Box::new(HeuristicProvider::new()),
        })
        .collect();

    let mut engine = Engine::new(settings);
    let outcome = if cli.quiet {
        engine.run(&scenario, &mut providers, &mut NullObserver)?
    } else {
        engine.run(&scenario, &mut providers, &mut ConsoleUi::new())?
    };

    if cli.quiet {
        println!(
            "'{}' finished after {} round(s): {} Winner: {}",
            scenario.name, outcome.rounds, outcome.reason, outcome.winner
        );
    }
    Ok(())
}
