use quadtree::QuadtreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("body radius and mass must be finite and positive (radius: {radius}, mass: {mass})")]
    InvalidBody { radius: f32, mass: f32 },
    #[error("world bounds must be finite and positive (width: {width}, height: {height})")]
    InvalidBounds { width: f32, height: f32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Quadtree(#[from] QuadtreeError),
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
