//! The particle engine: primitives, particles, the simulation controller and
//! the frame driver that feeds it.

pub mod color;
pub mod driver;
pub mod particle;
pub mod sim;
pub mod thermo;
pub mod vector;

pub use color::ColorRgb;
pub use driver::{FrameDriver, FrameOutcome};
pub use particle::{Particle, ParticleSpec};
pub use sim::{AppliedChanges, Circle, GrowthPolicy, Simulation, StepStats};
pub use thermo::ThermalStats;
pub use vector::Vector2D;
