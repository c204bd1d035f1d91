use deepcow_core::config::{EnvConfig, SpawnPoint, SpeciesConfig};
use deepcow_core::Environment;

#[allow(dead_code)]
pub struct EnvironmentBuilder {
    config: EnvConfig,
}

#[allow(dead_code)]
impl EnvironmentBuilder {
    /// An empty arena: no agents, no grass.
    pub fn new() -> Self {
        let mut config = EnvConfig::default();
        config.cow.count = 0;
        config.wolf.count = 0;
        config.grass.count = 0;
        config.seed = Some(0);
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut EnvConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_arena(mut self, width: f64, height: f64) -> Self {
        self.config.arena.width = width;
        self.config.arena.height = height;
        self
    }

    /// Adds a cow at `(x, y)` facing `heading` radians.
    pub fn with_cow(mut self, x: f64, y: f64, heading: f64) -> Self {
        push_agent(&mut self.config.cow, x, y, heading);
        self
    }

    pub fn with_wolf(mut self, x: f64, y: f64, heading: f64) -> Self {
        push_agent(&mut self.config.wolf, x, y, heading);
        self
    }

    pub fn with_random_cows(mut self, count: usize) -> Self {
        self.config.cow.count = count;
        self.config.cow.spawns.clear();
        self
    }

    pub fn with_random_wolves(mut self, count: usize) -> Self {
        self.config.wolf.count = count;
        self.config.wolf.spawns.clear();
        self
    }

    pub fn with_grass(mut self, x: f64, y: f64) -> Self {
        self.config.grass.spawns.push(SpawnPoint::at(x, y));
        self.config.grass.count = self.config.grass.spawns.len();
        self
    }

    pub fn with_random_grass(mut self, count: usize) -> Self {
        self.config.grass.count = count;
        self.config.grass.spawns.clear();
        self
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn build(self) -> Environment {
        Environment::new(self.config).expect("Failed to build environment")
    }
}

fn push_agent(species: &mut SpeciesConfig, x: f64, y: f64, heading: f64) {
    species.spawns.push(SpawnPoint::facing(x, y, heading));
    species.count = species.spawns.len();
}
