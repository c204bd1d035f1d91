//! Eat rule and per-cow reward.

use crate::agent::Agent;
use crate::config::{ArenaConfig, RewardConfig};
use crate::entity::Entity;
use rand::Rng;

/// Result of one cow's feeding check for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeedOutcome {
    /// Baseline reward, excluding the eat bonus.
    pub reward: f64,
    pub eaten: u32,
}

impl FeedOutcome {
    /// Baseline plus `eat_bonus` for every item eaten.
    #[must_use]
    pub fn total_reward(&self, config: &RewardConfig) -> f64 {
        self.reward + f64::from(self.eaten) * config.eat_bonus
    }
}

/// Eats every live food item overlapping `agent`.
///
/// Eaten items are marked dead and stay in place until [`respawn_eaten`]
/// runs, so an item is eaten at most once per tick no matter how many
/// agents overlap it.
pub fn eat(agent: &Agent, foods: &mut [Entity], dt: f64, config: &RewardConfig) -> FeedOutcome {
    let mut eaten = 0;
    for food in foods.iter_mut().filter(|f| f.alive) {
        if food.overlaps(agent) {
            food.alive = false;
            eaten += 1;
            tracing::debug!(agent = %agent.body.id, food = %food.id, "Food eaten");
        }
    }
    FeedOutcome {
        reward: -config.time_penalty * dt,
        eaten,
    }
}

/// Moves every dead item to a random spot and revives it, in index order.
///
/// The food count never changes. Returns the number of items respawned.
pub fn respawn_eaten<R: Rng>(foods: &mut [Entity], arena: &ArenaConfig, rng: &mut R) -> u32 {
    let mut respawned = 0;
    for food in foods.iter_mut().filter(|f| !f.alive) {
        food.times_eaten += 1;
        food.relocate(arena, rng);
        food.alive = true;
        respawned += 1;
        tracing::debug!(
            food = %food.id,
            x = food.position.x,
            y = food.position.y,
            "Food respawned"
        );
    }
    respawned
}
