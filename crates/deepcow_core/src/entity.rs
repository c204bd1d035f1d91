//! Base simulated object and the read-only view other systems consume.

use crate::config::{ArenaConfig, SpawnPoint};
use deepcow_data::{Color, EntityKind, Vector2};
use rand::Rng;
use uuid::Uuid;

/// Capabilities shared by every simulated object.
pub trait Body {
    fn id(&self) -> Uuid;
    fn kind(&self) -> EntityKind;
    fn position(&self) -> Vector2;
    fn radius(&self) -> f64;

    fn is_agent(&self) -> bool {
        self.kind().is_agent()
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id(),
            kind: self.kind(),
            position: self.position(),
            radius: self.radius(),
        }
    }
}

/// Copy of an entity's shape taken before perception runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub id: Uuid,
    pub kind: EntityKind,
    pub position: Vector2,
    pub radius: f64,
}

/// A positioned circle in the arena.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: Uuid,
    pub kind: EntityKind,
    pub position: Vector2,
    pub radius: f64,
    pub color: Color,
    /// False between being eaten and respawning within a tick.
    pub alive: bool,
    /// Fixed location used by `reset` instead of a random one.
    pub spawn: Option<SpawnPoint>,
    /// Times this entity was eaten since the last reset.
    pub times_eaten: u32,
}

impl Entity {
    /// Creates an entity with an id drawn from `rng` so runs stay reproducible.
    pub fn new<R: Rng>(
        kind: EntityKind,
        radius: f64,
        color: Color,
        spawn: Option<SpawnPoint>,
        rng: &mut R,
    ) -> Self {
        Self {
            id: Uuid::from_u128(rng.gen::<u128>()),
            kind,
            position: spawn.map_or(Vector2::ZERO, |s| Vector2::new(s.x, s.y)),
            radius,
            color,
            alive: true,
            spawn,
            times_eaten: 0,
        }
    }

    /// Returns to the spawn point (or a random spot) and clears transient state.
    pub fn reset<R: Rng>(&mut self, arena: &ArenaConfig, rng: &mut R) {
        self.position = match self.spawn {
            Some(s) => Vector2::new(s.x, s.y),
            None => random_position(arena, self.radius, rng),
        };
        self.alive = true;
        self.times_eaten = 0;
    }

    /// Moves the entity to a uniformly random spot, ignoring its spawn point.
    pub fn relocate<R: Rng>(&mut self, arena: &ArenaConfig, rng: &mut R) {
        self.position = random_position(arena, self.radius, rng);
    }

    #[must_use]
    pub fn overlaps(&self, other: &impl Body) -> bool {
        self.position.distance(other.position()) < self.radius + other.radius()
    }
}

impl Body for Entity {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn position(&self) -> Vector2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Uniform point whose circle of `radius` fits inside the arena.
///
/// Axes narrower than the circle collapse to their midpoint.
pub fn random_position<R: Rng>(arena: &ArenaConfig, radius: f64, rng: &mut R) -> Vector2 {
    Vector2::new(
        random_coordinate(arena.width, radius, rng),
        random_coordinate(arena.height, radius, rng),
    )
}

fn random_coordinate<R: Rng>(extent: f64, radius: f64, rng: &mut R) -> f64 {
    let (lo, hi) = (radius, extent - radius);
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        extent / 2.0
    }
}
