pub mod simulation;
pub mod step;

pub use simulation::Simulation;
pub use step::{step, step_in_place, StepParams, StepReport};
