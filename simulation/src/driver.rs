use crate::body::Body;
use crate::clock::Clock;
use crate::config::SimulationConfig;
use crate::error::{SimulationError, SimulationResult};
use crate::pool::{BodyPools, BALL_POOL};
use crate::render::Drawable;
use crate::spawn::{generate_random_bodies, SpawnSettings};
use crate::world::WorldBounds;

use collisions::resolve_leaf;
use common::shapes::Vec2;
use quadtree::{QuadTree, QuadTreeStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;
use tracing::{debug, enabled, info, Level};

/// Outcome of [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    // Fixed-size physics ticks run during this step.
    pub ticks: u32,
    // Leftover fraction of a tick, for render interpolation.
    pub alpha: f64,
}

/// Outcome of a single physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    // Colliding pairs resolved, counting repeats across leaves.
    pub collisions: usize,
}

/// Frame-stepped driver: owns the bodies and runs the broad phase, the collision
/// response and integration in fixed-size ticks.
///
/// Every tick rebuilds the quadtree from scratch over the `"ball"` pool, resolves each
/// leaf's members pairwise, then moves every body and reflects it off the walls.
pub struct Simulation {
    pools: BodyPools,
    bounds: WorldBounds,
    config: SimulationConfig,
    fixed_dt: f64,
    // Zero means no frame limit.
    min_frame_time: f64,
    accumulator: f64,
    tree: QuadTree,
    rng: StdRng,
    ticks: u64,
    running: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let bounds = config.bounds()?;
        let tree = QuadTree::new(bounds.rect(), config.quadtree_config())?;
        let mut simulation = Self {
            pools: BodyPools::new(),
            bounds,
            fixed_dt: config.fixed_dt,
            min_frame_time: 0.0,
            accumulator: 0.0,
            tree,
            rng: StdRng::seed_from_u64(config.seed),
            ticks: 0,
            running: false,
            config,
        };
        simulation.set_max_fps(simulation.config.max_fps);
        Ok(simulation)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    // Takes effect from the next tick.
    pub fn set_bounds(&mut self, width: f32, height: f32) -> SimulationResult<()> {
        self.bounds = WorldBounds::new(width, height)?;
        Ok(())
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn set_fixed_dt(&mut self, fixed_dt: f64) -> SimulationResult<()> {
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "fixed_dt must be finite and positive, got {fixed_dt}"
            )));
        }
        self.fixed_dt = fixed_dt;
        Ok(())
    }

    pub fn min_frame_time(&self) -> f64 {
        self.min_frame_time
    }

    pub fn set_max_fps(&mut self, fps: u32) {
        self.min_frame_time = if fps == 0 { 0.0 } else { 1.0 / f64::from(fps) };
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn pools(&self) -> &BodyPools {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> &mut BodyPools {
        &mut self.pools
    }

    pub fn bodies(&self) -> &[Body] {
        self.pools.pool(BALL_POOL)
    }

    /// Adds `config.initial_bodies` randomly placed bodies.
    pub fn populate(&mut self) -> SimulationResult<()> {
        self.spawn_random(self.config.initial_bodies)
    }

    pub fn spawn_random(&mut self, quantity: usize) -> SimulationResult<()> {
        let bodies = generate_random_bodies(quantity, self.bounds, &mut self.rng)?;
        self.pools.add_multi(BALL_POOL, bodies);
        Ok(())
    }

    pub fn spawn(&mut self, body: Body) {
        self.pools.add(BALL_POOL, body);
    }

    pub fn spawn_at(&mut self, settings: &SpawnSettings, position: Vec2) -> SimulationResult<()> {
        let body = settings.make_body(position, &mut self.rng)?;
        self.spawn(body);
        Ok(())
    }

    pub fn clear_bodies(&mut self) {
        self.pools.remove_pool(BALL_POOL);
    }

    /// Tree built during the last tick, for debug overlays.
    pub fn quadtree(&self) -> &QuadTree {
        &self.tree
    }

    pub fn last_stats(&self) -> QuadTreeStats {
        self.tree.stats()
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.pools.iter_all().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> Vec2 {
        self.pools
            .iter_all()
            .fold(Vec2::zeros(), |total, body| total + body.momentum())
    }

    /// Every body, followed by the last quadtree.
    pub fn drawables(&self) -> impl Iterator<Item = Drawable<'_>> {
        self.pools
            .iter_all()
            .map(Drawable::Ball)
            .chain(std::iter::once(Drawable::QuadTree(&self.tree)))
    }

    /// Adds `dt` to the accumulator and runs as many fixed ticks as fit into it.
    pub fn step(&mut self, dt: f64) -> SimulationResult<StepReport> {
        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            self.tick(self.fixed_dt)?;
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        Ok(StepReport {
            ticks,
            alpha: self.accumulator / self.fixed_dt,
        })
    }

    /// One physics tick: collision pass over the ball pool, then integration of every body.
    pub fn tick(&mut self, dt: f64) -> SimulationResult<TickReport> {
        let collisions = self.resolve_collisions()?;

        let bounds = self.bounds;
        let dt = dt as f32;
        for body in self.pools.iter_all_mut() {
            body.update(bounds, dt);
        }
        self.ticks += 1;

        if enabled!(Level::DEBUG) {
            let stats = self.tree.stats();
            debug!(
                tick = self.ticks,
                collisions,
                nodes = stats.nodes,
                leaves = stats.leaves,
                candidate_pairs = stats.candidate_pairs,
                redundant_pairs = stats.redundant_pairs(),
                "tick"
            );
        }
        Ok(TickReport { collisions })
    }

    fn resolve_collisions(&mut self) -> SimulationResult<usize> {
        self.tree.reset(self.bounds.rect())?;

        let bodies = self.pools.pool_mut(BALL_POOL);
        self.tree.insert_all(bodies.as_slice());

        let restitution = self.config.restitution;
        let rng = &mut self.rng;
        let mut collisions = 0;
        // Straddling bodies sit in several leaves and may be resolved against the same
        // partner more than once per tick.
        self.tree.traverse_leaves(bodies.as_mut_slice(), |indices, bodies| {
            collisions += resolve_leaf(indices, bodies, restitution, rng);
        });
        Ok(collisions)
    }

    /// Sleeps out whatever is left of the minimum frame time since `start`.
    pub fn enforce_fps_limit<C: Clock + ?Sized>(&self, clock: &mut C, start: f64) {
        let frame_time = clock.now() - start;
        if frame_time < self.min_frame_time {
            clock.sleep(self.min_frame_time - frame_time);
        }
    }

    /// Frame loop. Each iteration measures elapsed time, steps the simulation, hands the
    /// settled state to `frame`, then waits out the frame limit. Runs until `frame`
    /// breaks or a step fails.
    pub fn run<C, F>(&mut self, clock: &mut C, mut frame: F) -> SimulationResult<()>
    where
        C: Clock + ?Sized,
        F: FnMut(&Simulation, StepReport) -> ControlFlow<()>,
    {
        self.running = true;
        self.accumulator = 0.0;
        clock.reset();
        info!(
            bodies = self.bodies().len(),
            fixed_dt = self.fixed_dt,
            "simulation started"
        );

        while self.running {
            let start = clock.now();
            let dt = clock.delta();
            let report = match self.step(dt) {
                Ok(report) => report,
                Err(err) => {
                    self.running = false;
                    return Err(err);
                }
            };
            if frame(self, report).is_break() {
                self.stop();
            }
            self.enforce_fps_limit(clock, start);
        }

        info!(ticks = self.ticks, "simulation stopped");
        Ok(())
    }
}
