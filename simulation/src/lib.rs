pub mod body;
pub mod clock;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod pool;
pub mod render;
pub mod spawn;
pub mod world;

pub use body::Body;
pub use clock::{Clock, ManualClock, SystemClock};
pub use color::Color;
pub use config::SimulationConfig;
pub use driver::{Simulation, StepReport, TickReport};
pub use error::{SimulationError, SimulationResult};
pub use pool::{BodyPools, BALL_POOL};
pub use render::{Drawable, RenderKind, Renderer, RendererRegistry};
pub use spawn::{generate_random_bodies, SpawnSettings};
pub use world::WorldBounds;
