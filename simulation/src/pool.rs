use crate::body::Body;

use fxhash::FxHashMap;
use tracing::info;

/// Pool the simulation driver collides and integrates.
pub const BALL_POOL: &str = "ball";

/// Bodies grouped into named, insertion-ordered pools.
#[derive(Debug, Default, Clone)]
pub struct BodyPools {
    pools: FxHashMap<String, Vec<Body>>,
}

impl BodyPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pool: &str, body: Body) {
        self.pool_mut(pool).push(body);
    }

    pub fn add_multi<I>(&mut self, pool: &str, bodies: I)
    where
        I: IntoIterator<Item = Body>,
    {
        let target = self.pool_mut(pool);
        let before = target.len();
        target.extend(bodies);
        info!(pool, added = target.len() - before, total = target.len(), "bodies added");
    }

    // Clears the pool but keeps it registered.
    pub fn remove_pool(&mut self, pool: &str) {
        if let Some(bodies) = self.pools.get_mut(pool) {
            info!(pool, removed = bodies.len(), "pool cleared");
            bodies.clear();
        }
    }

    // Empty slice when the pool was never created.
    pub fn pool(&self, pool: &str) -> &[Body] {
        self.pools.get(pool).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pool_mut(&mut self, pool: &str) -> &mut Vec<Body> {
        self.pools.entry(pool.to_owned()).or_default()
    }

    pub fn pool_names(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &Body> {
        self.pools.values().flatten()
    }

    pub fn iter_all_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.pools.values_mut().flatten()
    }

    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Drops every pool.
    pub fn empty(&mut self) {
        self.pools.clear();
    }
}
