//! Decision providers: where a seat's choices come from. The engine and
//! phases depend only on the `DecisionProvider` trait; the two variants are
//! the deterministic heuristic used by computer seats and the interactive
//! prompt loop used by human seats.

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use rand::seq::SliceRandom;

use crate::board::{GridPos, TileId, TileKind};
use crate::entity::VillagerId;
use crate::render;
use crate::rng::SystemRng;
use crate::snapshot::BoardSnapshot;

#[derive(Debug, Clone)]
pub struct PlacementOption {
    pub tile: TileId,
    pub coord: GridPos,
    pub kind: TileKind,
}

pub struct PlacementContext<'a> {
    pub player: &'a str,
    pub board: &'a BoardSnapshot,
    pub options: &'a [PlacementOption],
}

#[derive(Debug, Clone)]
pub struct MoveCandidate {
    pub villager: VillagerId,
    /// Grid position while on land, `None` while swimming.
    pub coord: Option<GridPos>,
    pub in_water: bool,
    pub already_moved_in_water: bool,
    pub distance_remaining: u8,
    /// Largest legal spend for this villager right now; zero when the
    /// villager cannot be moved again this turn.
    pub max_amount: u8,
}

pub struct MoveContext<'a> {
    pub player: &'a str,
    pub points_left: u8,
    pub candidates: &'a [MoveCandidate],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub villager: VillagerId,
    pub amount: u8,
}

pub trait DecisionProvider {
    /// Asked once before this seat's placement begins. `true` skips the
    /// per-villager tile prompt and places every villager randomly.
    fn prefers_random_placement(&mut self) -> bool {
        false
    }

    /// Pick a tile among the occupiable options. `None` tells the caller
    /// to fall back to a uniformly random option.
    fn choose_placement_tile(
        &mut self,
        ctx: &PlacementContext<'_>,
        rng: &mut SystemRng<'_>,
    ) -> Option<TileId>;

    /// Whether to spend another movement point at all.
    fn wants_to_move(&mut self, ctx: &MoveContext<'_>) -> bool;

    /// Pick a villager and an amount. `None` declines, ending the
    /// movement phase and forfeiting the remaining points.
    fn choose_movement(&mut self, ctx: &MoveContext<'_>) -> Option<MoveChoice>;
}

/// Computer seat. Placement is uniform over the occupiable tiles; movement
/// is deterministic and greedy: always the movable villager closest to
/// safety, always the maximum legal amount.
#[derive(Debug, Default)]
pub struct HeuristicProvider;

impl HeuristicProvider {
    pub fn new() -> Self {
        Self
    }

    fn pick<'a>(ctx: &'a MoveContext<'_>) -> Option<&'a MoveCandidate> {
        let best = ctx
            .candidates
            .iter()
            .min_by_key(|c| c.distance_remaining)?;
        if best.in_water && best.already_moved_in_water {
            // A swimmer only gets one stroke per turn; try land instead.
            return ctx
                .candidates
                .iter()
                .filter(|c| !c.in_water)
                .min_by_key(|c| c.distance_remaining);
        }
        Some(best)
    }
}

impl DecisionProvider for HeuristicProvider {
    fn choose_placement_tile(
        &mut self,
        ctx: &PlacementContext<'_>,
        rng: &mut SystemRng<'_>,
    ) -> Option<TileId> {
        ctx.options.choose(rng).map(|option| option.tile)
    }

    fn wants_to_move(&mut self, ctx: &MoveContext<'_>) -> bool {
        Self::pick(ctx).is_some_and(|c| c.max_amount > 0)
    }

    fn choose_movement(&mut self, ctx: &MoveContext<'_>) -> Option<MoveChoice> {
        let candidate = Self::pick(ctx)?;
        if candidate.max_amount == 0 {
            return None;
        }
        Some(MoveChoice {
            villager: candidate.villager,
            amount: candidate.max_amount,
        })
    }
}

/// Human seat: a text prompt loop over any `BufRead`/`Write` pair, so tests
/// can script a whole session. Placement retries are capped at three before
/// falling back to a random tile; movement prompts reprompt indefinitely.
pub struct InteractiveProvider<R, W> {
    input: R,
    output: W,
}

const PLACEMENT_ATTEMPTS: u32 = 3;

impl InteractiveProvider<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }

    /// Print a prompt and read one line. `None` means the input is closed;
    /// callers treat that as a decline.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{prompt}");
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn ask_yes_no(&mut self, prompt: &str) -> bool {
        loop {
            match self.ask(prompt) {
                None => return false,
                Some(answer) => match answer.to_ascii_lowercase().as_str() {
                    "y" => return true,
                    "n" => return false,
                    _ => self.say("Invalid input. Please type 'y' or 'n' only."),
                },
            }
        }
    }

    fn print_candidates(&mut self, ctx: &MoveContext<'_>) {
        self.say("\nYour Villagers:");
        for candidate in ctx.candidates {
            let location = match candidate.coord {
                Some(pos) => pos.to_string(),
                None => "in water".to_string(),
            };
            let line = format!(
                "  ID {}: {}, moves needed: {}",
                candidate.villager, location, candidate.distance_remaining
            );
            self.say(&line);
        }
    }
}

impl<R: BufRead, W: Write> DecisionProvider for InteractiveProvider<R, W> {
    fn prefers_random_placement(&mut self) -> bool {
        self.ask_yes_no("Do you want to randomly place your villagers? (y/n): ")
    }

    fn choose_placement_tile(
        &mut self,
        ctx: &PlacementContext<'_>,
        _rng: &mut SystemRng<'_>,
    ) -> Option<TileId> {
        let board = render::format_board(ctx.board);
        self.say(&board);
        self.say("Available Tiles:");
        for option in ctx.options {
            let line = format!(
                "  {} - {} (Tile {})",
                option.coord,
                option.kind.name(),
                option.tile
            );
            self.say(&line);
        }

        let mut prompt = "Enter tile coordinate (e.g., A1) to place villager: ";
        for attempt in 1..=PLACEMENT_ATTEMPTS {
            let answer = self.ask(prompt)?;
            let rejection = match GridPos::parse(&answer) {
                None => "Invalid coordinate.",
                Some(pos) => match ctx.options.iter().find(|option| option.coord == pos) {
                    Some(option) => return Some(option.tile),
                    None => "Tile not available.",
                },
            };
            if attempt == PLACEMENT_ATTEMPTS {
                let line = format!("{rejection} Too many invalid attempts. Using random tile.");
                self.say(&line);
            } else {
                let line = format!("{rejection} Try again.");
                self.say(&line);
            }
            prompt = "Enter tile coordinate again: ";
        }
        None
    }

    fn wants_to_move(&mut self, ctx: &MoveContext<'_>) -> bool {
        self.print_candidates(ctx);
        let prompt = format!(
            "{} has {} movement point(s) left. Move a villager? (y/n): ",
            ctx.player, ctx.points_left
        );
        self.ask_yes_no(&prompt)
    }

    fn choose_movement(&mut self, ctx: &MoveContext<'_>) -> Option<MoveChoice> {
        let candidate = loop {
            let answer = self.ask("Enter the villager ID to move: ")?;
            let Ok(id) = answer.parse::<u32>() else {
                self.say("Invalid input. Please enter a numeric ID.");
                continue;
            };
            match ctx
                .candidates
                .iter()
                .find(|c| c.villager.raw() == id)
            {
                None => self.say("Invalid ID or that villager is not movable. Try again."),
                Some(c) if c.already_moved_in_water => {
                    self.say("You have already moved this villager in water this turn.");
                }
                Some(c) => break c,
            }
        };

        let max = candidate.max_amount;
        let amount = loop {
            let prompt = format!("Enter number of spaces to move (1..{max}): ");
            let answer = self.ask(&prompt)?;
            match answer.parse::<u8>() {
                Err(_) => self.say("Invalid input. Please enter a numeric value."),
                Ok(n) if n < 1 || n > max => {
                    let line = format!("Invalid movement. Enter a value from 1 to {max}.");
                    self.say(&line);
                }
                Ok(n) => break n,
            }
        };

        Some(MoveChoice {
            villager: candidate.villager,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn candidate(id: u32, in_water: bool, moved: bool, distance: u8, max: u8) -> MoveCandidate {
        MoveCandidate {
            villager: VillagerId::new(id),
            coord: None,
            in_water,
            already_moved_in_water: moved,
            distance_remaining: distance,
            max_amount: max,
        }
    }

    fn ctx<'a>(candidates: &'a [MoveCandidate]) -> MoveContext<'a> {
        MoveContext {
            player: "Test",
            points_left: 3,
            candidates,
        }
    }

    #[test]
    fn heuristic_prefers_smallest_distance() {
        let candidates = vec![
            candidate(1, false, false, 3, 3),
            candidate(2, false, false, 1, 1),
            candidate(3, false, false, 2, 2),
        ];
        let mut provider = HeuristicProvider::new();
        let choice = provider.choose_movement(&ctx(&candidates)).unwrap();
        assert_eq!(choice.villager, VillagerId::new(2));
        assert_eq!(choice.amount, 1);
    }

    #[test]
    fn heuristic_falls_back_to_land_when_swimmer_spent() {
        let candidates = vec![
            candidate(1, true, true, 1, 0),
            candidate(2, false, false, 3, 3),
        ];
        let mut provider = HeuristicProvider::new();
        let choice = provider.choose_movement(&ctx(&candidates)).unwrap();
        assert_eq!(choice.villager, VillagerId::new(2));
        assert_eq!(choice.amount, 3);
    }

    #[test]
    fn heuristic_declines_when_only_spent_swimmers_remain() {
        let candidates = vec![candidate(1, true, true, 1, 0)];
        let mut provider = HeuristicProvider::new();
        assert!(!provider.wants_to_move(&ctx(&candidates)));
        assert_eq!(provider.choose_movement(&ctx(&candidates)), None);
    }

    #[test]
    fn heuristic_spends_maximum_legal_amount() {
        let candidates = vec![candidate(1, false, false, 3, 2)];
        let mut provider = HeuristicProvider::new();
        let choice = provider.choose_movement(&ctx(&candidates)).unwrap();
        assert_eq!(choice.amount, 2);
    }

    #[test]
    fn interactive_reprompts_on_bad_yes_no_input() {
        let input = Cursor::new(b"maybe\nY\n".to_vec());
        let mut provider = InteractiveProvider::new(input, Vec::new());
        let candidates = vec![candidate(1, false, false, 2, 2)];
        assert!(provider.wants_to_move(&ctx(&candidates)));
        let output = String::from_utf8(provider.into_output()).unwrap();
        assert!(output.contains("Invalid input. Please type 'y' or 'n' only."));
    }

    #[test]
    fn interactive_movement_reprompts_until_valid() {
        let input = Cursor::new(b"abc\n99\n1\n9\n2\n".to_vec());
        let mut provider = InteractiveProvider::new(input, Vec::new());
        let candidates = vec![candidate(1, false, false, 3, 2)];
        let choice = provider.choose_movement(&ctx(&candidates)).unwrap();
        assert_eq!(choice.villager, VillagerId::new(1));
        assert_eq!(choice.amount, 2);
        let output = String::from_utf8(provider.into_output()).unwrap();
        assert!(output.contains("Invalid input. Please enter a numeric ID."));
        assert!(output.contains("Invalid ID or that villager is not movable. Try again."));
        assert!(output.contains("Invalid movement. Enter a value from 1 to 2."));
    }

    #[test]
    fn interactive_rejects_spent_swimmer_then_accepts_other() {
        let input = Cursor::new(b"1\n2\n1\n".to_vec());
        let mut provider = InteractiveProvider::new(input, Vec::new());
        let candidates = vec![
            candidate(1, true, true, 1, 0),
            candidate(2, false, false, 2, 2),
        ];
        let choice = provider.choose_movement(&ctx(&candidates)).unwrap();
        assert_eq!(choice.villager, VillagerId::new(2));
        let output = String::from_utf8(provider.into_output()).unwrap();
        assert!(output.contains("You have already moved this villager in water this turn."));
    }

    #[test]
    fn interactive_declines_on_closed_input() {
        let input = Cursor::new(Vec::new());
        let mut provider = InteractiveProvider::new(input, Vec::new());
        let candidates = vec![candidate(1, false, false, 2, 2)];
        assert!(!provider.wants_to_move(&ctx(&candidates)));
        assert_eq!(provider.choose_movement(&ctx(&candidates)), None);
    }
}
