use crate::error::{QuadtreeError, QuadtreeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // A leaf splits once it holds more than this many indices...
    pub node_capacity: usize,
    // ...unless it already sits at this depth.
    pub max_depth: usize,
}

impl Config {
    // Upper bound on `max_depth`. Insertion recurses once per level.
    pub const MAX_DEPTH_LIMIT: usize = 16;

    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.node_capacity == 0 || self.max_depth > Self::MAX_DEPTH_LIMIT {
            return Err(QuadtreeError::InvalidConfig {
                node_capacity: self.node_capacity,
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_capacity: 32,
            max_depth: 6,
        }
    }
}
