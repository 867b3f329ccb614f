use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error(
        "quadtree bounds must be finite with start <= end (start: ({start_x}, {start_y}), end: ({end_x}, {end_y}))"
    )]
    InvalidBounds {
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
    },
    #[error(
        "quadtree node_capacity must be at least 1 and max_depth at most {limit} (node_capacity: {node_capacity}, max_depth: {max_depth})",
        limit = crate::Config::MAX_DEPTH_LIMIT
    )]
    InvalidConfig {
        node_capacity: usize,
        max_depth: usize,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
