//! Built-in action sources for driving an [`Environment`](deepcow_core::Environment)
//! without a learner attached.

use deepcow_data::{Action, State};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses one action per agent from the current observations.
pub trait Policy {
    /// `states` is ordered like `Environment::agents()`; the result must match its length.
    fn act(&mut self, states: &[State]) -> Vec<Action>;

    fn name(&self) -> &'static str;
}

/// Uniformly random actions from a seeded generator.
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, states: &[State]) -> Vec<Action> {
        states
            .iter()
            .map(|_| Action::ALL[self.rng.gen_range(0..Action::COUNT)])
            .collect()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Every agent does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn act(&mut self, states: &[State]) -> Vec<Action> {
        vec![Action::Nothing; states.len()]
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}

/// Every agent drives straight ahead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardPolicy;

impl Policy for ForwardPolicy {
    fn act(&mut self, states: &[State]) -> Vec<Action> {
        vec![Action::MoveForward; states.len()]
    }

    fn name(&self) -> &'static str {
        "forward"
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Idle,
    Forward,
}

impl PolicyKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::Idle => Box::new(IdlePolicy),
            PolicyKind::Forward => Box::new(ForwardPolicy),
        }
    }
}
