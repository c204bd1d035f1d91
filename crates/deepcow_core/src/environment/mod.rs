//! The step coordinator: owns every entity and advances them tick by tick.
//!
//! Lifecycle: `new` builds the populations and calls `reset`; afterwards the
//! caller drives the episode with one `step` per tick and calls `reset` again
//! when it wants a fresh episode. Agent and grass membership never changes
//! after construction.

use crate::agent::Agent;
use crate::config::EnvConfig;
use crate::entity::Entity;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::render::{EntityView, Frame};
use deepcow_data::{Action, EntityKind, State};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod step;

/// What one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// One per agent: cows first, then wolves.
    pub states: Vec<State>,
    /// One per cow.
    pub rewards: Vec<f64>,
    pub done: bool,
    /// Episode hit `max_ticks` without being done.
    pub truncated: bool,
    /// Grass items eaten during this tick.
    pub eaten: u32,
}

pub struct Environment {
    config: EnvConfig,
    /// Cows occupy `..cow_count`, wolves the rest.
    agents: Vec<Agent>,
    cow_count: usize,
    grass: Vec<Entity>,
    rng: ChaCha8Rng,
    tick: u64,
    episode_tick: u64,
    metrics: Metrics,
}

impl Environment {
    /// Validates `config`, spawns every entity and performs an initial reset.
    pub fn new(config: EnvConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let kinematics = config.kinematics;
        let mut agents = Vec::with_capacity(config.agent_count());
        for i in 0..config.cow.count {
            agents.push(Agent::new(EntityKind::Cow, &config.cow, i, kinematics, &mut rng));
        }
        for i in 0..config.wolf.count {
            agents.push(Agent::new(
                EntityKind::Wolf,
                &config.wolf,
                i,
                kinematics,
                &mut rng,
            ));
        }
        let grass = (0..config.grass.count)
            .map(|i| {
                Entity::new(
                    EntityKind::Grass,
                    config.grass.radius,
                    config.grass.color,
                    config.grass.spawns.get(i).copied(),
                    &mut rng,
                )
            })
            .collect();

        tracing::info!(
            cows = config.cow.count,
            wolves = config.wolf.count,
            grass = config.grass.count,
            seed = ?config.seed,
            fingerprint = %config.fingerprint(),
            "Environment created"
        );

        let mut env = Self {
            cow_count: config.cow.count,
            config,
            agents,
            grass,
            rng,
            tick: 0,
            episode_tick: 0,
            metrics: Metrics::new(),
        };
        env.reset();
        Ok(env)
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Cows followed by wolves.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn cows(&self) -> &[Agent] {
        &self.agents[..self.cow_count]
    }

    #[must_use]
    pub fn wolves(&self) -> &[Agent] {
        &self.agents[self.cow_count..]
    }

    #[must_use]
    pub fn grass(&self) -> &[Entity] {
        &self.grass
    }

    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn cow_count(&self) -> usize {
        self.cow_count
    }

    /// Size of the discrete action space.
    #[must_use]
    pub fn action_count(&self) -> usize {
        Action::COUNT
    }

    /// Length of [`State::features`] for agent `index`.
    #[must_use]
    pub fn observation_len(&self, index: usize) -> Option<usize> {
        self.agents
            .get(index)
            .map(|a| State::feature_len(a.sensor.ray_count))
    }

    /// Ticks since construction, across episodes.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks since the last reset.
    #[must_use]
    pub fn episode_tick(&self) -> u64 {
        self.episode_tick
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Snapshot of the arena for an external renderer.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let agents = self.agents.iter().map(|a| EntityView {
            id: a.body.id,
            kind: a.body.kind,
            position: a.body.position,
            radius: a.body.radius,
            color: a.body.color,
            heading: Some(a.heading),
            rays: a.rays.clone(),
        });
        let grass = self.grass.iter().map(|g| EntityView {
            id: g.id,
            kind: g.kind,
            position: g.position,
            radius: g.radius,
            color: g.color,
            heading: None,
            rays: Vec::new(),
        });
        Frame {
            tick: self.tick,
            width: self.config.arena.width,
            height: self.config.arena.height,
            entities: agents.chain(grass).collect(),
        }
    }
}
