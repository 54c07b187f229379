//! Movement resolution: a fixed per-turn point budget spent across one
//! player's villagers, with the once-per-turn limit on swimmers.

use std::collections::HashSet;

use crate::decision::{DecisionProvider, MoveCandidate, MoveContext};
use crate::entity::{PlayerId, VillagerId, VillagerState};
use crate::world::{GameWorld, MoveOutcome};

#[derive(Debug, Clone)]
pub struct MoveAction {
    pub villager: VillagerId,
    pub amount: u8,
    pub reached_safety: bool,
}

/// Run one player's movement phase. The loop keeps going while points
/// remain and the player still has a movable villager; the provider may
/// end it early by declining. Swimmers spend exactly one point for one
/// unit and may only be moved once per turn; land villagers spend
/// 1..=min(points, distance) in a single action.
pub fn run(
    world: &mut GameWorld,
    player: PlayerId,
    provider: &mut dyn DecisionProvider,
    points: u8,
) -> Vec<MoveAction> {
    let mut points_left = points;
    let mut water_moved: HashSet<VillagerId> = HashSet::new();
    let mut actions = Vec::new();
    let name = world.player(player).name.clone();

    while points_left > 0 {
        let candidates = build_candidates(world, player, points_left, &water_moved);
        if candidates.is_empty() {
            break;
        }
        let ctx = MoveContext {
            player: &name,
            points_left,
            candidates: &candidates,
        };
        if !provider.wants_to_move(&ctx) {
            break;
        }
        let Some(choice) = provider.choose_movement(&ctx) else {
            break;
        };

        // Re-validate against the candidate list; an out-of-range request
        // is dropped and the provider is asked again next iteration.
        let Some(candidate) = candidates.iter().find(|c| c.villager == choice.villager) else {
            continue;
        };
        if candidate.max_amount == 0 || choice.amount < 1 || choice.amount > candidate.max_amount {
            continue;
        }

        let outcome = world.move_villager(choice.villager, choice.amount);
        points_left -= choice.amount;
        let reached_safety = outcome == MoveOutcome::ReachedSafety;
        if !reached_safety && candidate.in_water {
            water_moved.insert(choice.villager);
        }
        actions.push(MoveAction {
            villager: choice.villager,
            amount: choice.amount,
            reached_safety,
        });
    }
    actions
}

fn build_candidates(
    world: &GameWorld,
    player: PlayerId,
    points_left: u8,
    water_moved: &HashSet<VillagerId>,
) -> Vec<MoveCandidate> {
    world
        .movable_villagers(player)
        .into_iter()
        .filter_map(|id| {
            let villager = world.villager(id)?;
            let in_water = villager.state == VillagerState::InWater;
            let already_moved_in_water = in_water && water_moved.contains(&id);
            let max_amount = if in_water {
                if already_moved_in_water {
                    0
                } else {
                    1
                }
            } else {
                points_left.min(villager.distance_remaining)
            };
            Some(MoveCandidate {
                villager: id,
                coord: world.villager_position(id),
                in_water,
                already_moved_in_water,
                distance_remaining: villager.distance_remaining,
                max_amount,
            })
        })
        .collect()
}
