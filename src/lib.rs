//! A circular body under gravity and drag, bouncing inside a spinning regular polygon.

pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Contact, ContactFeature};
pub use common::{Material, SimError, SimResult, SimulationConfig};
pub use integration::Drag;
pub use math::vec2::Vec2;
pub use objects::{Body, Boundary};
pub use world::{step, Simulation, StepParams, StepReport};
