//! Ray-cast vision.
//!
//! An agent sees through a fan of `ray_count` rays spread evenly over its
//! field of view. Each ray reports the nearest entity it touches. Rays are
//! ordered from the clockwise edge of the fan to the counter-clockwise edge
//! and keep that order every tick.

use crate::entity::EntitySnapshot;
use crate::geometry::ray_circle_intersection;
use deepcow_data::{EntityKind, RayReading, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shape of an agent's ray fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub ray_count: usize,
    /// Total spread in degrees.
    pub field_of_view: f64,
    pub ray_length: f64,
}

/// World-space segment of one ray, kept for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayTrace {
    pub start: Vector2,
    pub end: Vector2,
    pub hit: Option<EntityKind>,
}

impl Sensor {
    /// Absolute angles (radians) of every ray for an agent facing `heading`.
    #[must_use]
    pub fn ray_angles(&self, heading: f64) -> Vec<f64> {
        match self.ray_count {
            0 => Vec::new(),
            1 => vec![heading],
            n => {
                let fov = self.field_of_view.to_radians();
                let step = fov / (n - 1) as f64;
                let first = heading - fov / 2.0;
                (0..n).map(|i| first + step * i as f64).collect()
            }
        }
    }

    /// Casts the full fan from `origin`, ignoring the entity `self_id`.
    #[must_use]
    pub fn scan(
        &self,
        self_id: Uuid,
        origin: Vector2,
        heading: f64,
        targets: &[EntitySnapshot],
    ) -> (Vec<RayReading>, Vec<RayTrace>) {
        let angles = self.ray_angles(heading);
        let mut readings = Vec::with_capacity(angles.len());
        let mut traces = Vec::with_capacity(angles.len());
        for angle in angles {
            let direction = Vector2::from_angle(angle);
            let reading = cast_ray(origin, direction, self.ray_length, self_id, targets);
            traces.push(RayTrace {
                start: origin,
                end: origin + direction * reading.distance,
                hit: reading.kind,
            });
            readings.push(reading);
        }
        (readings, traces)
    }
}

/// Nearest entity along one ray. Ties keep the earliest target in `targets`.
#[must_use]
pub fn cast_ray(
    origin: Vector2,
    direction: Vector2,
    ray_length: f64,
    self_id: Uuid,
    targets: &[EntitySnapshot],
) -> RayReading {
    let mut best = RayReading::miss(ray_length);
    for target in targets {
        if target.id == self_id {
            continue;
        }
        if let Some(t) =
            ray_circle_intersection(origin, direction, ray_length, target.position, target.radius)
        {
            if t < best.distance {
                best = RayReading::hit(t, target.kind);
            }
        }
    }
    best
}
