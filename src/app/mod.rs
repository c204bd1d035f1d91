pub mod config;
pub mod runner;

pub use config::{load_config, to_toml};
pub use runner::{EpisodeReport, EpisodeRunner, DEFAULT_TICK_LIMIT};
