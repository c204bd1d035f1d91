use super::entity::EntityKind;
use super::vector::Vector2;
use serde::{Deserialize, Serialize};

/// Nearest hit along one perception ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayReading {
    /// Distance to the hit, or the full ray length when nothing was hit.
    pub distance: f64,
    pub kind: Option<EntityKind>,
}

impl RayReading {
    #[must_use]
    pub fn hit(distance: f64, kind: EntityKind) -> Self {
        Self {
            distance,
            kind: Some(kind),
        }
    }

    #[must_use]
    pub fn miss(ray_length: f64) -> Self {
        Self {
            distance: ray_length,
            kind: None,
        }
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.kind.is_some()
    }
}

/// Observation handed to a policy for one agent after one tick.
///
/// `rays` are ordered from the clockwise edge of the field of view to the
/// counter-clockwise edge, so index `i` always looks in the same relative
/// direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub rays: Vec<RayReading>,
    pub ray_length: f64,
    pub heading: f64,
    pub velocity: Vector2,
    pub max_speed: f64,
}

impl State {
    /// Features contributed by each ray: normalized distance + one-hot kind.
    pub const FEATURES_PER_RAY: usize = 1 + EntityKind::ALL.len();
    /// Trailing features: normalized speed, sin(heading), cos(heading).
    pub const SELF_FEATURES: usize = 3;

    /// Length of [`State::features`] for an agent with `ray_count` rays.
    #[must_use]
    pub fn feature_len(ray_count: usize) -> usize {
        ray_count * Self::FEATURES_PER_RAY + Self::SELF_FEATURES
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Flattens the observation into a fixed-length vector for a learner.
    #[must_use]
    pub fn features(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(Self::feature_len(self.rays.len()));
        for ray in &self.rays {
            let norm = if self.ray_length > 0.0 {
                ray.distance / self.ray_length
            } else {
                1.0
            };
            out.push(norm as f32);
            for kind in EntityKind::ALL {
                out.push(if ray.kind == Some(kind) { 1.0 } else { 0.0 });
            }
        }
        let speed = if self.max_speed > 0.0 {
            (self.speed() / self.max_speed).min(1.0)
        } else {
            0.0
        };
        out.push(speed as f32);
        out.push(self.heading.sin() as f32);
        out.push(self.heading.cos() as f32);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> State {
        State {
            rays: vec![
                RayReading::hit(50.0, EntityKind::Grass),
                RayReading::miss(100.0),
            ],
            ray_length: 100.0,
            heading: 0.0,
            velocity: Vector2::new(10.0, 0.0),
            max_speed: 20.0,
        }
    }

    #[test]
    fn test_feature_length_matches() {
        let state = sample_state();
        assert_eq!(state.features().len(), State::feature_len(2));
    }

    #[test]
    fn test_feature_encoding() {
        let f = sample_state().features();
        assert_eq!(&f[0..4], &[0.5, 0.0, 0.0, 1.0]);
        assert_eq!(&f[4..8], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(f[8], 0.5);
        assert_eq!(f[9], 0.0);
        assert_eq!(f[10], 1.0);
    }

    #[test]
    fn test_zero_ray_length_is_finite() {
        let state = State {
            rays: vec![RayReading::miss(0.0)],
            ray_length: 0.0,
            heading: 1.0,
            velocity: Vector2::ZERO,
            max_speed: 0.0,
        };
        assert!(state.features().iter().all(|v| v.is_finite()));
    }
}
