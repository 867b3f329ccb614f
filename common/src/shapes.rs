use nalgebra::Vector2;
use rand::Rng;

pub type Vec2 = Vector2<f32>;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }

    pub fn x(&self) -> f32 {
        self.center.x
    }

    pub fn y(&self) -> f32 {
        self.center.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

// Axis-aligned rectangle stored as two corners. Screen coordinates: y grows downward,
// so `start` is the top-left corner and `end` the bottom-right one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub start: Vec2,
    pub end: Vec2,
}

impl Rectangle {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            start: Vec2::zeros(),
            end: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> f32 {
        self.end.y - self.start.y
    }

    pub fn left(&self) -> f32 {
        self.start.x
    }

    pub fn right(&self) -> f32 {
        self.end.x
    }

    pub fn top(&self) -> f32 {
        self.start.y
    }

    pub fn bottom(&self) -> f32 {
        self.end.y
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) / 2.0
    }

    /// Splits the rectangle at its midpoint into `[nw, ne, sw, se]`.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let mid = self.midpoint();
        [
            Rectangle::new(self.start, mid),
            Rectangle::new(Vec2::new(mid.x, self.start.y), Vec2::new(self.end.x, mid.y)),
            Rectangle::new(Vec2::new(self.start.x, mid.y), Vec2::new(mid.x, self.end.y)),
            Rectangle::new(mid, self.end),
        ]
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    // Finite corners with start <= end on both axes. Zero-size rectangles are valid.
    pub fn is_valid(&self) -> bool {
        self.start.iter().chain(self.end.iter()).all(|v| v.is_finite())
            && self.start.x <= self.end.x
            && self.start.y <= self.end.y
    }

    pub fn random_circle_position<R: Rng + ?Sized>(&self, radius: f32, rng: &mut R) -> Vec2 {
        Vec2::new(
            safe_rand_f32(rng, self.left() + radius, self.right() - radius),
            safe_rand_f32(rng, self.top() + radius, self.bottom() - radius),
        )
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::from_size(0.0, 0.0)
    }
}

fn safe_rand_f32<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
