//! # Deepcow Core
//!
//! The simulation engine behind deepcow, a 2D predator–prey arena for
//! reinforcement-learning agents.
//!
//! Cows and wolves are circular agents that steer with five discrete actions
//! and see the world through a fan of distance rays. Grass is static food;
//! a cow that touches it earns a bonus and the grass respawns elsewhere.
//!
//! ## Tick order
//!
//! Every [`Environment::step`] runs the same phases:
//! 1. apply one action per agent,
//! 2. integrate positions, separate overlapping agents, clamp to the arena,
//! 3. cast every agent's rays against a snapshot of the arena,
//! 4. let each cow eat the grass it overlaps.
//!
//! ## Example
//!
//! ```
//! use deepcow_core::{Action, EnvConfig, Environment};
//!
//! let config = EnvConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let mut env = Environment::new(config).unwrap();
//! let states = env.reset();
//! assert_eq!(states.len(), env.agent_count());
//!
//! let actions = vec![Action::MoveForward; env.agent_count()];
//! let outcome = env.step(&actions).unwrap();
//! assert_eq!(outcome.rewards.len(), env.cow_count());
//! ```

/// Agent bodies, steering and integration
pub mod agent;
/// Agent–agent and agent–border contact resolution
pub mod collision;
/// Configuration management for simulation parameters
pub mod config;
/// Passive circular bodies and spawn placement
pub mod entity;
/// The step coordinator
pub mod environment;
pub mod error;
/// Grass consumption and reward
pub mod feeding;
pub mod geometry;
/// Performance metrics collection and logging
pub mod metrics;
/// Ray-fan perception
pub mod perception;
/// Frames for external renderers
pub mod render;
/// Episode end conditions
pub mod termination;

pub use config::EnvConfig;
pub use environment::{Environment, StepOutcome};
pub use error::{Result, SimError};
pub use metrics::{init_logging, Metrics};
pub use render::{Frame, NullRenderer, Renderer};
pub use termination::TerminationPolicy;
pub use deepcow_data::{Action, Color, EntityKind, RayReading, State, Vector2};
