use crate::error::{SimulationError, SimulationResult};
use common::shapes::Rectangle;

/// Size of the area bodies bounce around in, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    width: f32,
    height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> SimulationResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimulationError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rect(&self) -> Rectangle {
        Rectangle::from_size(self.width, self.height)
    }
}
