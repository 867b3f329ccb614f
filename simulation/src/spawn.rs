use crate::body::Body;
use crate::color::Color;
use crate::error::SimulationResult;
use crate::world::WorldBounds;

use common::shapes::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

// Randomly generated bodies all share one size: radius is twice it, mass equals it.
const RANDOM_BODY_SIZE: f32 = 1.0;
const RANDOM_MAX_SPEED: f32 = 200.0;

const SPAWN_MIN_SIZE: f32 = 1.0;
const SPAWN_MAX_SIZE: f32 = 20.0;
const SPAWN_DEFAULT_SIZE: f32 = 2.0;
const SPAWN_MAX_SPEED: f32 = 100.0;
// Minimum time between two spawns while the spawn button is held.
const SPAWN_INTERVAL: f64 = 0.05;

pub fn generate_random_bodies<R: Rng + ?Sized>(
    quantity: usize,
    bounds: WorldBounds,
    rng: &mut R,
) -> SimulationResult<Vec<Body>> {
    let area = bounds.rect();
    (0..quantity)
        .map(|_| {
            let position = area.random_circle_position(RANDOM_BODY_SIZE, rng);
            let velocity = random_velocity(rng, RANDOM_MAX_SPEED);
            let color = *Color::PALETTE.choose(rng).unwrap_or(&Color::WHITE);
            Body::new(
                RANDOM_BODY_SIZE * 2.0,
                position,
                color,
                RANDOM_BODY_SIZE,
                velocity,
            )
        })
        .collect()
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, max_speed: f32) -> Vec2 {
    Vec2::new(
        rng.gen_range(-max_speed..=max_speed),
        rng.gen_range(-max_speed..=max_speed),
    )
}

/// User-driven spawning: adjustable body size and a throttle for held-down spawning.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSettings {
    size: f32,
    last_spawn: Option<f64>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            size: SPAWN_DEFAULT_SIZE,
            last_spawn: None,
        }
    }
}

impl SpawnSettings {
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn grow(&mut self) {
        self.size = (self.size + 1.0).min(SPAWN_MAX_SIZE);
    }

    pub fn shrink(&mut self) {
        self.size = (self.size - 1.0).max(SPAWN_MIN_SIZE);
    }

    // A click always spawns and restarts the throttle window.
    pub fn click(&mut self, now: f64) {
        self.last_spawn = Some(now);
    }

    // While held, spawn at most once per interval. Returns whether a spawn is due.
    pub fn hold(&mut self, now: f64) -> bool {
        if let Some(last) = self.last_spawn {
            if last + SPAWN_INTERVAL > now {
                return false;
            }
        }
        self.last_spawn = Some(now);
        true
    }

    // Mass grows with the circumference.
    pub fn make_body<R: Rng + ?Sized>(
        &self,
        position: Vec2,
        rng: &mut R,
    ) -> SimulationResult<Body> {
        Body::new(
            self.size,
            position,
            Color::WHITE,
            self.size * TAU,
            random_velocity(rng, SPAWN_MAX_SPEED),
        )
    }
}
