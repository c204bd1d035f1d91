//! Run statistics and structured logging.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Counters for ticks, episodes and eat events.
pub struct Metrics {
    tick_count: AtomicU64,
    episode_count: AtomicU64,
    eat_count: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            episode_count: AtomicU64::new(0),
            eat_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick and how much grass was eaten in it.
    pub fn record_tick(&self, eaten: u32, agents: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.eat_count.fetch_add(u64::from(eaten), Ordering::Relaxed);

        if tick % 1000 == 0 {
            tracing::info!(
                tick = tick,
                agents = agents,
                eaten_total = self.eat_count.load(Ordering::Relaxed),
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Simulation tick"
            );
        }
    }

    /// Records the end of an episode.
    pub fn record_episode(&self, ticks: u64, total_reward: f64, truncated: bool) {
        let episode = self.episode_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            episode = episode,
            ticks = ticks,
            total_reward = total_reward,
            truncated = truncated,
            "Episode finished"
        );
    }

    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn episode_count(&self) -> u64 {
        self.episode_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn eat_count(&self) -> u64 {
        self.eat_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this twice is harmless.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
