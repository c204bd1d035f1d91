use super::{Environment, StepOutcome};
use crate::collision::{resolve_agent_collisions, resolve_border_collision};
use crate::entity::{Body, EntitySnapshot};
use crate::error::{Result, SimError};
use crate::feeding;
use deepcow_data::{Action, State};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Environment {
    /// Starts a new episode and returns one observation per agent.
    ///
    /// Every entity returns to its spawn point (or a fresh random spot), then
    /// one idle tick runs without the eat phase. The observations therefore
    /// have the same shape as those from [`Environment::step`], and food that
    /// spawns under a cow is still there for the first step.
    pub fn reset(&mut self) -> Vec<State> {
        let arena = self.config.arena;
        for agent in &mut self.agents {
            agent.reset(&arena, &mut self.rng);
        }
        for grass in &mut self.grass {
            grass.reset(&arena, &mut self.rng);
        }
        self.episode_tick = 0;

        let idle = vec![Action::Nothing; self.agents.len()];
        self.perform_actions(&idle);
        self.update_agents_positions();
        let states = self.perceive();
        tracing::debug!(tick = self.tick, agents = self.agents.len(), "Episode reset");
        states
    }

    /// Advances the simulation by one tick.
    ///
    /// `actions[i]` drives `agents()[i]`. A mis-sized action list is rejected
    /// before any state changes.
    pub fn step(&mut self, actions: &[Action]) -> Result<StepOutcome> {
        self.check_action_count(actions.len())?;

        self.perform_actions(actions);
        self.update_agents_positions();
        let states = self.perceive();
        let (rewards, eaten) = self.eat();

        self.tick += 1;
        self.episode_tick += 1;

        let done = self.config.episode.termination.is_done(eaten, &self.grass);
        let truncated = !done
            && self
                .config
                .episode
                .max_ticks
                .is_some_and(|max| self.episode_tick >= max);

        self.metrics.record_tick(eaten, self.agents.len());
        if done {
            tracing::debug!(tick = self.tick, eaten = eaten, "Episode done");
        }

        Ok(StepOutcome {
            states,
            rewards,
            done,
            truncated,
            eaten,
        })
    }

    /// Like [`Environment::step`], but takes raw action indices from a policy.
    pub fn step_indices(&mut self, indices: &[usize]) -> Result<StepOutcome> {
        self.check_action_count(indices.len())?;
        let actions = indices
            .iter()
            .map(|&i| Action::from_index(i).ok_or(SimError::UnknownAction(i)))
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| {
                self.metrics.increment_counter("rejected_steps");
                tracing::warn!(error = %e, "Rejected step");
            })?;
        self.step(&actions)
    }

    fn check_action_count(&self, actual: usize) -> Result<()> {
        let expected = self.agents.len();
        if actual != expected {
            let err = SimError::action_count(expected, actual);
            self.metrics.increment_counter("rejected_steps");
            tracing::warn!(error = %err, "Rejected step");
            return Err(err);
        }
        Ok(())
    }

    fn perform_actions(&mut self, actions: &[Action]) {
        let dt = self.config.delta_time;
        for (agent, &action) in self.agents.iter_mut().zip(actions) {
            agent.apply_action(dt, action);
        }
    }

    fn update_agents_positions(&mut self) {
        let dt = self.config.delta_time;
        for agent in &mut self.agents {
            agent.update_position(dt);
        }
        resolve_agent_collisions(&mut self.agents);
        let arena = self.config.arena;
        let restitution = self.config.kinematics.border_restitution;
        for agent in &mut self.agents {
            resolve_border_collision(agent, &arena, restitution);
        }
    }

    fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.agents
            .iter()
            .map(Body::snapshot)
            .chain(self.grass.iter().map(Body::snapshot))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn perceive(&mut self) -> Vec<State> {
        let targets = self.snapshots();
        self.agents
            .iter_mut()
            .map(|agent| agent.perceive(&targets))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn perceive(&mut self) -> Vec<State> {
        let targets = self.snapshots();
        self.agents
            .par_iter_mut()
            .map(|agent| agent.perceive(&targets))
            .collect()
    }

    /// Runs the eat rule for every cow, then respawns what was eaten.
    /// Returns per-cow rewards and the total eaten.
    ///
    /// Cows are checked in order; grass overlapped by several cows goes to
    /// the first. Nothing is relocated until every cow has been checked.
    fn eat(&mut self) -> (Vec<f64>, u32) {
        let dt = self.config.delta_time;
        let mut rewards = Vec::with_capacity(self.cow_count);
        let mut eaten = 0;
        for cow in &self.agents[..self.cow_count] {
            let outcome = feeding::eat(cow, &mut self.grass, dt, &self.config.reward);
            rewards.push(outcome.total_reward(&self.config.reward));
            eaten += outcome.eaten;
        }
        feeding::respawn_eaten(&mut self.grass, &self.config.arena, &mut self.rng);
        (rewards, eaten)
    }
}
