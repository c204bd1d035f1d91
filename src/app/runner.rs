use anyhow::Result;
use deepcow_core::{Environment, Renderer};
use serde::{Deserialize, Serialize};

use crate::policy::Policy;

/// Hard stop for episodes whose config can never end them on its own.
pub const DEFAULT_TICK_LIMIT: u64 = 100_000;

/// Summary of one finished episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub episode: u64,
    pub ticks: u64,
    /// Summed reward per cow.
    pub rewards: Vec<f64>,
    pub eaten: u32,
    pub done: bool,
    /// Ended by a tick limit rather than the termination policy.
    pub truncated: bool,
}

impl EpisodeReport {
    #[must_use]
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }
}

/// Drives an environment with a policy, one episode at a time.
pub struct EpisodeRunner {
    env: Environment,
    policy: Box<dyn Policy>,
    renderer: Option<Box<dyn Renderer>>,
    tick_limit: u64,
    episodes: u64,
}

impl EpisodeRunner {
    pub fn new(env: Environment, policy: Box<dyn Policy>) -> Self {
        let tick_limit = env
            .config()
            .episode
            .max_ticks
            .unwrap_or(DEFAULT_TICK_LIMIT);
        Self {
            env,
            policy,
            renderer: None,
            tick_limit,
            episodes: 0,
        }
    }

    /// Attaches a renderer that receives a frame after reset and after every step.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn with_tick_limit(mut self, limit: u64) -> Self {
        self.tick_limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    /// Runs one episode to completion.
    ///
    /// Step errors abort the episode. A failing renderer is detached with a
    /// warning and the episode continues headless.
    pub fn run_episode(&mut self) -> Result<EpisodeReport> {
        let mut states = self.env.reset();
        self.render();

        let mut rewards = vec![0.0; self.env.cow_count()];
        let mut eaten = 0;
        let mut ticks = 0;
        let (done, truncated) = loop {
            let actions = self.policy.act(&states);
            let outcome = self.env.step(&actions)?;
            ticks += 1;
            eaten += outcome.eaten;
            for (total, r) in rewards.iter_mut().zip(&outcome.rewards) {
                *total += r;
            }
            self.render();

            if outcome.done {
                break (true, false);
            }
            if outcome.truncated || ticks >= self.tick_limit {
                break (false, true);
            }
            states = outcome.states;
        };

        self.episodes += 1;
        let report = EpisodeReport {
            episode: self.episodes,
            ticks,
            rewards,
            eaten,
            done,
            truncated,
        };
        self.env
            .metrics()
            .record_episode(ticks, report.total_reward(), truncated);
        Ok(report)
    }

    /// Runs `episodes` episodes back to back.
    pub fn run(&mut self, episodes: usize) -> Result<Vec<EpisodeReport>> {
        tracing::info!(
            episodes = episodes,
            policy = self.policy.name(),
            tick_limit = self.tick_limit,
            "Starting run"
        );
        (0..episodes).map(|_| self.run_episode()).collect()
    }

    fn render(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Err(e) = renderer.render(&self.env.frame()) {
            tracing::warn!(error = %e, "Renderer failed, continuing headless");
            self.renderer = None;
        }
    }
}
