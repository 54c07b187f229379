//! Console presentation: board drawing, status lines and phase
//! announcements. Consumes snapshots and phase reports only.

use crate::board::{TileKind, COL_LETTERS};
use crate::engine::{GameOutcome, Observer};
use crate::phases::{CreatureOutcome, MoveAction, PlacementReport, SinkReport};
use crate::snapshot::{BoardSnapshot, GameSnapshot};

pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const CELL_WIDTH: usize = 5;

pub fn color_for(kind: TileKind) -> &'static str {
    match kind {
        TileKind::Beach => CYAN,
        TileKind::Forest => GREEN,
        TileKind::Mountain => YELLOW,
        TileKind::Volcano => RED,
    }
}

/// Draw the island as a bordered table: columns A-E, rows 1-3, each cell
/// five characters wide. Sunk tiles show as `  X  `.
pub fn format_board(board: &BoardSnapshot) -> String {
    let mut out = String::new();
    let header: Vec<String> = COL_LETTERS
        .iter()
        .map(|letter| format!("{letter:^width$}", width = CELL_WIDTH))
        .collect();
    out.push_str(&format!("    {}\n", header.join(" ")));
    let border = format!("    +{}+\n", vec!["-".repeat(CELL_WIDTH); COL_LETTERS.len()].join("+"));
    out.push_str(&border);
    for (r, row) in board.rows.iter().enumerate() {
        out.push_str(&format!("{:>4}|", r + 1));
        for cell in row {
            match cell.kind {
                Some(kind) => out.push_str(&format!(
                    " {}{}{}:{} ",
                    color_for(kind),
                    kind.letter(),
                    RESET,
                    cell.occupants
                )),
                None => out.push_str("  X  "),
            }
            out.push('|');
        }
        out.push('\n');
        out.push_str(&border);
    }
    out
}

/// Observer that narrates the game to stdout.
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }

    fn print_statuses(&self, snapshot: &GameSnapshot) {
        println!("\nPlayer Status:");
        for status in &snapshot.players {
            println!(
                "  {:10}: Remaining = {}, Saved = {}, Killed = {}",
                status.name, status.remaining, status.saved, status.killed
            );
        }
        println!();
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ConsoleUi {
    fn game_started(&mut self, _snapshot: &GameSnapshot) {
        println!(
            "\nWelcome to {GREEN}Escape from Atlantis{RESET}!\n\
             ------------------------------------------------\n\
             Rescue your villagers from a sinking island. The island is a\n\
             table with columns A-E and rows 1-3. Tile types:\n\
             {CYAN}B{RESET} = Beach - needs 3 moves to be safe.\n\
             {GREEN}F{RESET} = Forest - needs 2 moves.\n\
             {YELLOW}M{RESET} = Mountain - needs 1 move.\n\
             {RED}V{RESET} = Volcano - a dangerous tile.\n\
             Every turn you get 3 movement points. After movement a tile\n\
             sinks, and a creature may attack swimmers. Safe villagers are\n\
             worth their treasure (1-6); the highest total wins.\n\
             ------------------------------------------------\n"
        );
        println!("Setting up the game and placing villagers on the island...\n");
    }

    fn placement_finished(&mut self, report: &PlacementReport) {
        println!("Placing villagers for {}:", report.player);
        for record in &report.records {
            println!(
                "  {} placed villager {} (treasure {}) on tile {} ({}).",
                report.player,
                record.villager,
                record.treasure,
                record.tile,
                record.kind.name()
            );
        }
        if report.exhausted {
            println!("No available tiles to place a villager!");
        }
        println!();
    }

    fn round_started(&mut self, round: u32, snapshot: &GameSnapshot) {
        println!("\n{YELLOW}=========== Round {round} ==========={RESET}");
        println!("{}", format_board(&snapshot.board));
    }

    fn turn_started(&mut self, player: &str) {
        println!("\n>>> {CYAN}{player}'s Turn{RESET} <<<");
    }

    fn movement_finished(&mut self, player: &str, actions: &[MoveAction], snapshot: &GameSnapshot) {
        for action in actions {
            println!(
                "{} moves villager {} by {} space(s).",
                player, action.villager, action.amount
            );
            if action.reached_safety {
                println!("{}'s villager {} has reached safety!", player, action.villager);
            }
        }
        println!("--- End of {CYAN}{player}'s Movement Phase{RESET} ---");
        self.print_statuses(snapshot);
    }

    fn tile_sunk(&mut self, report: Option<&SinkReport>) {
        match report {
            Some(report) => {
                println!(
                    "Sinking tile {} ({}) at {}.",
                    report.tile,
                    report.kind.name(),
                    report.coord
                );
                for (villager, owner) in &report.overboard {
                    println!("  Villager {villager} from {owner} falls into the water!");
                }
            }
            None => println!("No tiles left to sink."),
        }
    }

    fn creature_resolved(&mut self, outcome: &CreatureOutcome) {
        println!("--- Creature Phase ---");
        println!("Creature die roll: {}", outcome.roll);
        match &outcome.victim {
            Some((villager, owner)) => {
                println!("Shark attack! Villager {villager} from {owner} is killed in the water!");
            }
            None if outcome.roll <= 2 => {
                println!("No villagers in water for the shark to attack.");
            }
            None => println!("No creature attack this turn."),
        }
        println!("----------------------\n");
    }

    fn game_finished(&mut self, outcome: &GameOutcome, _snapshot: &GameSnapshot) {
        println!("\n{RED}========== GAME OVER! =========={RESET}");
        println!("Reason: {}\n", outcome.reason);
        for status in &outcome.scores {
            println!(
                "{} rescued {} villagers with total treasure {}.",
                status.name, status.saved, status.score
            );
        }
        println!("\nThe winner is {}!", outcome.winner);
        if let Some(path) = &outcome.summary_path {
            println!("Summary written to {}", path.display());
        }
    }
}
