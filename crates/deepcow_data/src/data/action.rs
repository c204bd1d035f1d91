use serde::{Deserialize, Serialize};

/// Command issued to one agent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Nothing,
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Nothing,
        Action::MoveForward,
        Action::MoveBackward,
        Action::TurnLeft,
        Action::TurnRight,
    ];

    /// Size of the discrete action space.
    pub const COUNT: usize = Self::ALL.len();

    /// Maps a policy output index to an action. Out-of-range indices yield `None`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Action::Nothing => 0,
            Action::MoveForward => 1,
            Action::MoveBackward => 2,
            Action::TurnLeft => 3,
            Action::TurnRight => 4,
        }
    }
}
