use serde::Deserialize;

use crate::api::error::Result;
use crate::api::types::Bounds;
use crate::core::regime::EnvironmentRegime;

/// Configuration for the simulation, provided by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Tick interval in seconds for the fixed-rate driver (default: 0.1).
    pub tick_interval: f32,
    /// World width in world units.
    pub world_width: f32,
    /// World height in world units.
    pub world_height: f32,
    /// Arena capacity. Additions beyond it are declined (default: 64).
    pub max_atoms: usize,
    /// Seed for placement, target selection and cosmetic randomness.
    pub seed: u64,
    /// Central-attraction multiplier while guided (free mode uses 1.0).
    pub guided_central_multiplier: f32,
    /// Regime active after construction.
    pub initial_regime: EnvironmentRegime,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: 0.1,
            world_width: 800.0,
            world_height: 600.0,
            max_atoms: 64,
            seed: 42,
            guided_central_multiplier: 3.0,
            initial_regime: EnvironmentRegime::Ideal,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The whole world as simulation bounds.
    pub fn world_bounds(&self) -> Bounds {
        Bounds::from_size(self.world_width, self.world_height)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_atoms(mut self, max_atoms: usize) -> Self {
        self.max_atoms = max_atoms;
        self
    }

    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    pub fn with_guided_central_multiplier(mut self, multiplier: f32) -> Self {
        self.guided_central_multiplier = multiplier;
        self
    }

    pub fn with_initial_regime(mut self, regime: EnvironmentRegime) -> Self {
        self.initial_regime = regime;
        self
    }
}
