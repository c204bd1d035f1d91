//! Mobile entities: kinematics, action handling and perception.

use crate::config::{ArenaConfig, KinematicsConfig, SpeciesConfig};
use crate::entity::{Body, Entity, EntitySnapshot};
use crate::geometry::wrap_angle;
use crate::perception::{RayTrace, Sensor};
use deepcow_data::{Action, EntityKind, State, Vector2};
use rand::Rng;
use std::f64::consts::TAU;
use uuid::Uuid;

/// A cow or a wolf.
#[derive(Debug, Clone)]
pub struct Agent {
    pub body: Entity,
    /// Radians in `[0, 2π)`; 0 faces +x.
    pub heading: f64,
    pub velocity: Vector2,
    pub mass: f64,
    pub sensor: Sensor,
    pub kinematics: KinematicsConfig,
    /// Ray segments from the latest perception pass.
    pub rays: Vec<RayTrace>,
}

impl Agent {
    pub fn new<R: Rng>(
        kind: EntityKind,
        species: &SpeciesConfig,
        index: usize,
        kinematics: KinematicsConfig,
        rng: &mut R,
    ) -> Self {
        let spawn = species.spawns.get(index).copied();
        let body = Entity::new(kind, species.radius, species.color, spawn, rng);
        Self {
            body,
            heading: spawn.and_then(|s| s.heading).map_or(0.0, wrap_angle),
            velocity: Vector2::ZERO,
            mass: species.mass,
            sensor: Sensor {
                ray_count: species.ray_count,
                field_of_view: species.field_of_view,
                ray_length: species.ray_length,
            },
            kinematics,
            rays: Vec::new(),
        }
    }

    /// Unit vector along the current heading.
    #[must_use]
    pub fn forward(&self) -> Vector2 {
        Vector2::from_angle(self.heading)
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Returns to the spawn point (or a random spot and heading) at rest.
    pub fn reset<R: Rng>(&mut self, arena: &ArenaConfig, rng: &mut R) {
        self.body.reset(arena, rng);
        self.heading = match self.body.spawn.and_then(|s| s.heading) {
            Some(h) => wrap_angle(h),
            None => rng.gen_range(0.0..TAU),
        };
        self.velocity = Vector2::ZERO;
        self.rays.clear();
    }

    /// Applies one tick's worth of `action` to velocity or heading.
    pub fn apply_action(&mut self, dt: f64, action: Action) {
        let k = self.kinematics;
        let accel = k.thrust / self.mass * dt;
        match action {
            Action::MoveForward => self.velocity += self.forward() * accel,
            Action::MoveBackward => self.velocity -= self.forward() * accel,
            Action::TurnLeft => self.heading = wrap_angle(self.heading + k.turn_rate * dt),
            Action::TurnRight => self.heading = wrap_angle(self.heading - k.turn_rate * dt),
            Action::Nothing => {
                let speed = self.speed();
                let slowed = (speed - k.friction / self.mass * dt).max(0.0);
                self.velocity = self.velocity.normalize() * slowed;
            }
        }
        let speed = self.speed();
        if speed > k.max_speed {
            self.velocity = self.velocity * (k.max_speed / speed);
        }
    }

    /// Explicit Euler step followed by per-tick damping.
    pub fn update_position(&mut self, dt: f64) {
        self.body.position += self.velocity * dt;
        self.velocity = self.velocity * self.kinematics.damping;
        if self.speed() < self.kinematics.rest_speed {
            self.velocity = Vector2::ZERO;
        }
    }

    /// Casts the ray fan against `targets` and returns the observation.
    pub fn perceive(&mut self, targets: &[EntitySnapshot]) -> State {
        let (readings, traces) =
            self.sensor
                .scan(self.body.id, self.body.position, self.heading, targets);
        self.rays = traces;
        State {
            rays: readings,
            ray_length: self.sensor.ray_length,
            heading: self.heading,
            velocity: self.velocity,
            max_speed: self.kinematics.max_speed,
        }
    }
}

impl Body for Agent {
    fn id(&self) -> Uuid {
        self.body.id
    }

    fn kind(&self) -> EntityKind {
        self.body.kind
    }

    fn position(&self) -> Vector2 {
        self.body.position
    }

    fn radius(&self) -> f64 {
        self.body.radius
    }
}
