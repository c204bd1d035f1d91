//! Configuration for the simulation environment.
//!
//! Every construction-time option of an [`Environment`](crate::environment::Environment)
//! lives here. Sections map to tables of a `config.toml` file; omitted tables
//! and keys fall back to their `Default` values.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! delta_time = 0.016666
//! seed = 42
//!
//! [arena]
//! width = 800.0
//! height = 600.0
//!
//! [cow]
//! count = 1
//! ray_count = 20
//! field_of_view = 100.0
//!
//! [wolf]
//! count = 0
//!
//! [episode]
//! termination = "first_eat"
//! max_ticks = 3600
//! ```

use crate::termination::TerminationPolicy;
use deepcow_data::Color;
use serde::{Deserialize, Serialize};

/// Size of the rectangular play field `[0, width] x [0, height]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ArenaConfig {
    /// True when a circle of `radius` centred at (`x`, `y`) lies inside the arena.
    ///
    /// On an axis narrower than the circle only the midpoint fits, matching
    /// where random placement and the border clamp put such a circle.
    #[must_use]
    pub fn fits(&self, x: f64, y: f64, radius: f64) -> bool {
        fits_axis(self.width, radius, x) && fits_axis(self.height, radius, y)
    }
}

fn fits_axis(extent: f64, radius: f64, v: f64) -> bool {
    if radius < extent - radius {
        (radius..=extent - radius).contains(&v)
    } else {
        v == extent / 2.0
    }
}

/// Fixed spawn location. `heading` is in radians; `None` draws a random one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub heading: Option<f64>,
}

impl SpawnPoint {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            heading: None,
        }
    }

    #[must_use]
    pub fn facing(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading: Some(heading),
        }
    }
}

/// Per-species agent parameters.
///
/// The first `spawns.len()` agents of the species use the listed spawn points
/// on every reset; the rest spawn at random.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeciesConfig {
    pub count: usize,
    pub ray_count: usize,
    /// Angular spread of the ray fan in degrees.
    pub field_of_view: f64,
    pub ray_length: f64,
    pub mass: f64,
    pub radius: f64,
    pub color: Color,
    pub spawns: Vec<SpawnPoint>,
}

impl SpeciesConfig {
    #[must_use]
    pub fn cow() -> Self {
        Self {
            count: 1,
            ray_count: 20,
            field_of_view: 100.0,
            ray_length: 300.0,
            mass: 2.0,
            radius: 20.0,
            color: Color::COW,
            spawns: Vec::new(),
        }
    }

    #[must_use]
    pub fn wolf() -> Self {
        Self {
            color: Color::WOLF,
            ..Self::cow()
        }
    }

    fn validate(&self, name: &str, arena: &ArenaConfig) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.mass > 0.0 && self.mass.is_finite(),
            "{name} mass must be positive"
        );
        anyhow::ensure!(
            self.radius > 0.0 && self.radius.is_finite(),
            "{name} radius must be positive"
        );
        anyhow::ensure!(
            (0.0..=360.0).contains(&self.field_of_view),
            "{name} field of view must be in [0, 360] degrees"
        );
        anyhow::ensure!(
            self.ray_length >= 0.0 && self.ray_length.is_finite(),
            "{name} ray length must be non-negative"
        );
        validate_spawns(name, &self.spawns, self.count, self.radius, arena)
    }
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self::cow()
    }
}

/// Stationary food. Eaten grass is moved, never removed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GrassConfig {
    pub count: usize,
    pub radius: f64,
    pub color: Color,
    pub spawns: Vec<SpawnPoint>,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            count: 1,
            radius: 10.0,
            color: Color::GRASS,
            spawns: Vec::new(),
        }
    }
}

/// Motion tuning shared by all agents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Force applied by MoveForward/MoveBackward; acceleration is `thrust / mass`.
    pub thrust: f64,
    /// Heading change per second while turning, in radians.
    pub turn_rate: f64,
    /// Braking force applied while idle; deceleration is `friction / mass`.
    pub friction: f64,
    pub max_speed: f64,
    /// Velocity multiplier applied once per tick regardless of `delta_time`.
    pub damping: f64,
    /// Speeds below this snap to zero.
    pub rest_speed: f64,
    /// Fraction of the outward velocity kept (and reversed) on border contact.
    pub border_restitution: f64,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            thrust: 400.0,
            turn_rate: 3.0,
            friction: 100.0,
            max_speed: 200.0,
            damping: 0.98,
            rest_speed: 0.5,
            border_restitution: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward per grass item eaten.
    pub eat_bonus: f64,
    /// Penalty per simulated second, charged to every cow.
    pub time_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            eat_bonus: 10.0,
            time_penalty: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct EpisodeConfig {
    pub termination: TerminationPolicy,
    /// Steps after which an episode is reported as truncated.
    pub max_ticks: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EnvConfig {
    pub arena: ArenaConfig,
    pub cow: SpeciesConfig,
    pub wolf: SpeciesConfig,
    pub grass: GrassConfig,
    pub kinematics: KinematicsConfig,
    pub reward: RewardConfig,
    pub episode: EpisodeConfig,
    /// Simulated seconds per tick.
    pub delta_time: f64,
    /// Whether the caller should attach a renderer. The core never draws.
    pub draw: bool,
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            cow: SpeciesConfig::cow(),
            wolf: SpeciesConfig::wolf(),
            grass: GrassConfig::default(),
            kinematics: KinematicsConfig::default(),
            reward: RewardConfig::default(),
            episode: EpisodeConfig::default(),
            delta_time: 1.0 / 60.0,
            draw: false,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Err` describing the first violated rule.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.arena.width > 0.0 && self.arena.width.is_finite(),
            "Arena width must be positive"
        );
        anyhow::ensure!(
            self.arena.height > 0.0 && self.arena.height.is_finite(),
            "Arena height must be positive"
        );
        anyhow::ensure!(
            self.delta_time > 0.0 && self.delta_time.is_finite(),
            "Delta time must be positive"
        );

        self.cow.validate("Cow", &self.arena)?;
        self.wolf.validate("Wolf", &self.arena)?;

        anyhow::ensure!(
            self.grass.radius > 0.0 && self.grass.radius.is_finite(),
            "Grass radius must be positive"
        );
        validate_spawns(
            "Grass",
            &self.grass.spawns,
            self.grass.count,
            self.grass.radius,
            &self.arena,
        )?;

        let k = &self.kinematics;
        anyhow::ensure!(k.thrust >= 0.0, "Thrust must be non-negative");
        anyhow::ensure!(k.turn_rate >= 0.0, "Turn rate must be non-negative");
        anyhow::ensure!(k.friction >= 0.0, "Friction must be non-negative");
        anyhow::ensure!(k.max_speed > 0.0, "Max speed must be positive");
        anyhow::ensure!(
            k.damping > 0.0 && k.damping <= 1.0,
            "Damping must be in (0.0, 1.0]"
        );
        anyhow::ensure!(k.rest_speed >= 0.0, "Rest speed must be non-negative");
        anyhow::ensure!(
            (0.0..=1.0).contains(&k.border_restitution),
            "Border restitution must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.reward.eat_bonus.is_finite(),
            "Eat bonus must be finite"
        );
        anyhow::ensure!(
            self.reward.time_penalty >= 0.0 && self.reward.time_penalty.is_finite(),
            "Time penalty must be non-negative"
        );
        anyhow::ensure!(
            self.episode.max_ticks != Some(0),
            "Max episode ticks must be positive when set"
        );

        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Digest of every parameter that influences simulation outcomes.
    ///
    /// Cosmetic settings (colors, `draw`) and the seed are excluded so runs can
    /// be grouped by rule set.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.arena).as_bytes());
        for species in [&self.cow, &self.wolf] {
            hasher.update(
                format!(
                    "{}:{}:{}:{}:{}:{}:{:?}",
                    species.count,
                    species.ray_count,
                    species.field_of_view,
                    species.ray_length,
                    species.mass,
                    species.radius,
                    species.spawns
                )
                .as_bytes(),
            );
        }
        hasher.update(
            format!(
                "{}:{}:{:?}",
                self.grass.count, self.grass.radius, self.grass.spawns
            )
            .as_bytes(),
        );
        hasher.update(format!("{:?}", self.kinematics).as_bytes());
        hasher.update(format!("{:?}", self.reward).as_bytes());
        hasher.update(format!("{:?}", self.episode).as_bytes());
        hasher.update(self.delta_time.to_le_bytes());
        hex::encode(hasher.finalize())
    }

    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.cow.count + self.wolf.count
    }
}

fn validate_spawns(
    name: &str,
    spawns: &[SpawnPoint],
    count: usize,
    radius: f64,
    arena: &ArenaConfig,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        spawns.len() <= count,
        "{name} has {} spawn points but only {count} entities",
        spawns.len()
    );
    for spawn in spawns {
        anyhow::ensure!(
            arena.fits(spawn.x, spawn.y, radius),
            "{name} spawn point ({}, {}) does not fit a radius {radius} body inside the arena",
            spawn.x,
            spawn.y
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(EnvConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_arena_width() {
        let config = EnvConfig {
            arena: ArenaConfig {
                width: 0.0,
                height: 600.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_mass() {
        let config = EnvConfig {
            cow: SpeciesConfig {
                mass: 0.0,
                ..SpeciesConfig::cow()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_radius() {
        let config = EnvConfig {
            grass: GrassConfig {
                radius: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_delta_time() {
        let config = EnvConfig {
            delta_time: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_rays_and_fov_are_allowed() {
        let config = EnvConfig {
            cow: SpeciesConfig {
                ray_count: 0,
                field_of_view: 0.0,
                ..SpeciesConfig::cow()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spawn_outside_arena() {
        let config = EnvConfig {
            grass: GrassConfig {
                spawns: vec![SpawnPoint::at(900.0, 10.0)],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spawn_must_fit_body_inside_arena() {
        let with_cow_at = |x: f64, y: f64| EnvConfig {
            cow: SpeciesConfig {
                count: 1,
                spawns: vec![SpawnPoint::facing(x, y, 0.0)],
                ..SpeciesConfig::cow()
            },
            ..Default::default()
        };
        // Cow radius is 20.
        assert!(with_cow_at(0.0, 300.0).validate().is_err());
        assert!(with_cow_at(400.0, 590.0).validate().is_err());
        assert!(with_cow_at(20.0, 300.0).validate().is_ok());
        assert!(with_cow_at(780.0, 580.0).validate().is_ok());
    }

    #[test]
    fn test_fits_narrow_arena_only_at_midpoint() {
        let arena = ArenaConfig {
            width: 30.0,
            height: 600.0,
        };
        assert!(arena.fits(15.0, 300.0, 20.0));
        assert!(!arena.fits(20.0, 300.0, 20.0));
        assert!(arena.fits(15.0, 20.0, 15.0));
        assert!(!arena.fits(15.0, 10.0, 15.0));
    }

    #[test]
    fn test_too_many_spawns() {
        let config = EnvConfig {
            cow: SpeciesConfig {
                count: 1,
                spawns: vec![SpawnPoint::at(10.0, 10.0), SpawnPoint::at(20.0, 20.0)],
                ..SpeciesConfig::cow()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EnvConfig::from_toml(
            r#"
            seed = 7

            [arena]
            width = 400.0
            height = 300.0

            [wolf]
            count = 0

            [episode]
            termination = "all_grass_eaten"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.arena.width, 400.0);
        assert_eq!(config.wolf.count, 0);
        assert_eq!(config.cow.ray_count, 20);
        assert_eq!(config.episode.termination, TerminationPolicy::AllGrassEaten);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(EnvConfig::from_toml("delta_time = -1.0").is_err());
    }

    #[test]
    fn test_fingerprint_ignores_cosmetics() {
        let a = EnvConfig::default();
        let mut b = EnvConfig::default();
        b.draw = true;
        b.seed = Some(99);
        b.cow.color = Color::rgb(1, 2, 3);
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.reward.eat_bonus = 5.0;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
