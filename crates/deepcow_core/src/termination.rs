//! When an episode counts as finished.

use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// Rule deciding the `done` flag after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationPolicy {
    /// Done on any tick in which any cow ate any grass.
    #[default]
    FirstEat,
    /// Done once every grass item has been eaten at least once this episode.
    AllGrassEaten,
    /// Never done; rely on truncation or the caller.
    Never,
}

impl TerminationPolicy {
    #[must_use]
    pub fn is_done(&self, eaten_this_tick: u32, grass: &[Entity]) -> bool {
        match self {
            TerminationPolicy::FirstEat => eaten_this_tick > 0,
            TerminationPolicy::AllGrassEaten => {
                !grass.is_empty() && grass.iter().all(|g| g.times_eaten > 0)
            }
            TerminationPolicy::Never => false,
        }
    }
}
