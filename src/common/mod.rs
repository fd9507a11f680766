pub mod config;
pub mod error;
pub mod material;

pub use config::{BodyConfig, BoundaryConfig, PhysicsConfig, SimulationConfig, TimestepConfig};
pub use error::{SimError, SimResult};
pub use material::Material;
