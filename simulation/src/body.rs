use crate::color::Color;
use crate::error::{SimulationError, SimulationResult};
use crate::render::RenderKind;
use crate::world::WorldBounds;

use collisions::Collider;
use common::collision_detection::circle_rectangle;
use common::shapes::{Circle, Rectangle, Vec2};
use quadtree::QuadTreeItem;
use std::fmt;

// How far past a wall a body may drift before it is reflected. Avoids chatter right at
// the boundary.
pub const BOUNDARY_EPSILON: f32 = 1.0;

/// A ball: a movable circle with mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    radius: f32,
    position: Vec2,
    velocity: Vec2,
    mass: f32,
    color: Color,
}

impl Body {
    pub fn new(
        radius: f32,
        position: Vec2,
        color: Color,
        mass: f32,
        velocity: Vec2,
    ) -> SimulationResult<Self> {
        validate(radius, mass)?;
        Ok(Self {
            radius,
            position,
            velocity,
            mass,
            color,
        })
    }

    pub fn kind(&self) -> RenderKind {
        RenderKind::Ball
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) -> SimulationResult<()> {
        validate(radius, self.mass)?;
        self.radius = radius;
        Ok(())
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> SimulationResult<()> {
        validate(self.radius, mass)?;
        self.mass = mass;
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.position,
            radius: self.radius,
        }
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// Reflects off any wall the body has crossed, then advances it by `velocity * dt`.
    pub fn update(&mut self, bounds: WorldBounds, dt: f32) {
        if self.is_vertical_border_collided(bounds.width()) {
            self.velocity.x = -self.velocity.x;
            self.position.x = if self.position.x < self.radius {
                self.radius
            } else {
                bounds.width() - self.radius
            };
        }
        if self.is_horizontal_border_collided(bounds.height()) {
            self.velocity.y = -self.velocity.y;
            self.position.y = if self.position.y < self.radius {
                self.radius
            } else {
                bounds.height() - self.radius
            };
        }
        self.position += self.velocity * dt;
    }

    pub fn is_vertical_border_collided(&self, width: f32) -> bool {
        !within_walls(self.position.x, self.radius, width)
    }

    pub fn is_horizontal_border_collided(&self, height: f32) -> bool {
        !within_walls(self.position.y, self.radius, height)
    }
}

fn within_walls(coordinate: f32, radius: f32, extent: f32) -> bool {
    radius - BOUNDARY_EPSILON < coordinate && coordinate < extent - radius + BOUNDARY_EPSILON
}

fn validate(radius: f32, mass: f32) -> SimulationResult<()> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(radius) && valid(mass) {
        Ok(())
    } else {
        Err(SimulationError::InvalidBody { radius, mass })
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Radius: {}, Center: ({}, {}), Color: {:?}, Mass: {}, Velocity: ({}, {})",
            self.radius,
            self.position.x,
            self.position.y,
            self.color,
            self.mass,
            self.velocity.x,
            self.velocity.y
        )
    }
}

impl Collider for Body {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn mass(&self) -> f32 {
        self.mass
    }
}

impl QuadTreeItem for Body {
    fn intersects_rect(&self, rect: &Rectangle) -> bool {
        circle_rectangle(&self.circle(), rect)
    }
}
