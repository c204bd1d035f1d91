//! Error types for the simulation core.
//!
//! Every variant is a contract violation by the caller. Numeric edge cases
//! (zero vectors, empty ray fans) never produce errors.

use thiserror::Error;

/// Main error type for deepcow_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// `step` received a different number of actions than there are agents.
    #[error("Action count mismatch: expected {expected}, got {actual}")]
    ActionCountMismatch { expected: usize, actual: usize },

    /// A policy emitted an action index outside the action space.
    #[error("Unknown action index: {0}")]
    UnknownAction(usize),

    /// Construction-time configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] anyhow::Error),
}

/// Result type alias for deepcow_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    #[must_use]
    pub fn action_count(expected: usize, actual: usize) -> Self {
        Self::ActionCountMismatch { expected, actual }
    }

    /// True for errors that reject a tick before any state was touched.
    #[must_use]
    pub fn is_step_rejection(&self) -> bool {
        matches!(
            self,
            Self::ActionCountMismatch { .. } | Self::UnknownAction(_)
        )
    }
}
