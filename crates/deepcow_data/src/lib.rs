//! Plain data types shared by the deepcow engine and its callers.

pub mod data;

pub use data::action::Action;
pub use data::entity::{Color, EntityKind};
pub use data::observation::{RayReading, State};
pub use data::vector::Vector2;
