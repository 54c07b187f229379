//! Creature phase: a die roll that may cost somebody a swimmer.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entity::VillagerId;
use crate::rng::SystemRng;
use crate::world::GameWorld;

#[derive(Debug, Clone)]
pub struct CreatureOutcome {
    pub roll: u8,
    /// The killed villager and its owner's name, when the attack landed.
    pub victim: Option<(VillagerId, String)>,
}

pub fn run(world: &mut GameWorld, rng: &mut SystemRng<'_>) -> CreatureOutcome {
    let roll = rng.gen_range(1..=6);
    resolve(world, roll, rng)
}

/// Apply a given roll: 1 or 2 means one swimmer, picked uniformly across
/// all players, is killed; 3-6 is a miss. No swimmers means nothing
/// happens. Split from `run` so tests can pin the roll.
pub fn resolve(world: &mut GameWorld, roll: u8, rng: &mut SystemRng<'_>) -> CreatureOutcome {
    let victim = if roll <= 2 {
        let swimmers = world.villagers_in_water();
        swimmers.choose(rng).copied().map(|id| {
            let owner = world
                .villager(id)
                .map(|v| world.player(v.owner).name.clone())
                .unwrap_or_default();
            world.kill_villager(id);
            (id, owner)
        })
    } else {
        None
    };
    CreatureOutcome { roll, victim }
}
