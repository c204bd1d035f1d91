//! Outer layer of deepcow: episode runner, built-in policies, config loading
//! and frame renderers. The simulation itself lives in `deepcow_core`.

pub mod app;
pub mod policy;
pub mod ui;

pub use app::{EpisodeReport, EpisodeRunner};
pub use policy::{ForwardPolicy, IdlePolicy, Policy, PolicyKind, RandomPolicy};
