//! Simulation settings, loadable from YAML.
//!
//! Every field is optional in the file; missing fields fall back to the defaults below.
//!
//! ```yaml
//! width: 1280
//! height: 720
//! fixed_dt: 0.016666668   # physics step in seconds
//! max_fps: 240            # 0 disables the frame limiter
//! restitution: 0.001      # 0 = perfectly inelastic, 1 = perfectly elastic
//! node_capacity: 32       # quadtree leaf split threshold, at least 1
//! max_depth: 6            # quadtree depth cap, at most 16
//! initial_bodies: 1000
//! seed: 42
//! ```

use crate::error::{SimulationError, SimulationResult};
use crate::world::WorldBounds;

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    pub fixed_dt: f64,
    pub max_fps: u32,
    pub restitution: f32,
    pub node_capacity: usize,
    pub max_depth: usize,
    pub initial_bodies: usize,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let quadtree = quadtree::Config::default();
        Self {
            width: 1280.0,
            height: 720.0,
            fixed_dt: 1.0 / 60.0,
            max_fps: 240,
            restitution: 0.001,
            node_capacity: quadtree.node_capacity,
            max_depth: quadtree.max_depth,
            initial_bodies: 1000,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(yaml: &str) -> SimulationResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        self.bounds()?;
        self.quadtree_config().validate()?;
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "fixed_dt must be finite and positive, got {}",
                self.fixed_dt
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimulationError::InvalidConfig(format!(
                "restitution must be within [0, 1], got {}",
                self.restitution
            )));
        }
        Ok(())
    }

    pub fn bounds(&self) -> SimulationResult<WorldBounds> {
        WorldBounds::new(self.width, self.height)
    }

    pub fn quadtree_config(&self) -> quadtree::Config {
        quadtree::Config {
            node_capacity: self.node_capacity,
            max_depth: self.max_depth,
        }
    }
}
