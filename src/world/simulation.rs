use tracing::{debug, info, warn};

use crate::common::config::SimulationConfig;
use crate::common::error::{ensure_finite, SimError, SimResult};
use crate::math::vec2::Vec2;
use crate::objects::{Body, Boundary};
use crate::world::step::{step_in_place, StepParams, StepReport};

/// Owns the body and boundary and drives them at a fixed timestep.
///
/// Frame deltas fed to [`Simulation::advance`] are accumulated and consumed
/// in `fixed_dt` ticks, at most `max_substeps` per call. Any backlog beyond
/// that is dropped rather than carried into the next frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    body: Body,
    boundary: Boundary,
    params: StepParams,

    initial_body: Body,
    initial_boundary: Boundary,

    fixed_dt: f64,
    max_substeps: u32,
    recover_escapes: bool,
    accumulator: f64,
    ticks: u64,
    last_report: StepReport,
}

impl Simulation {
    /// Builds a simulation from `config`, rejecting anything that could not run.
    pub fn new(config: &SimulationConfig) -> SimResult<Self> {
        let boundary = config.build_boundary()?;
        let body = config.build_body()?;
        let params = config.step_params()?;

        let fixed_dt = config.timestep.fixed_dt;
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(SimError::InvalidTimestep(fixed_dt));
        }
        if body.radius() >= boundary.apothem() {
            return Err(SimError::BodyDoesNotFit {
                radius: body.radius(),
                apothem: boundary.apothem(),
            });
        }
        if !boundary.contains(body.position) {
            return Err(SimError::BodyOutsideBoundary {
                x: body.position.x,
                y: body.position.y,
            });
        }

        for w in config.warnings() {
            warn!("{w}");
        }

        Ok(Self {
            body,
            boundary,
            params,
            initial_body: body,
            initial_boundary: boundary,
            fixed_dt,
            max_substeps: config.timestep.max_substeps,
            recover_escapes: config.recover_escapes,
            accumulator: 0.0,
            ticks: 0,
            last_report: StepReport::default(),
        })
    }

    /// Runs one tick of length `dt`, bypassing the accumulator.
    pub fn step(&mut self, dt: f64) -> StepReport {
        let mut report = step_in_place(&mut self.body, &mut self.boundary, dt, &self.params);
        if !(dt.is_finite() && dt > 0.0) {
            return report;
        }
        self.ticks += 1;

        let escaped = !(self.body.position.is_finite() && self.boundary.contains(self.body.position));
        if self.recover_escapes && escaped {
            warn!(
                tick = self.ticks,
                position = ?self.body.position,
                velocity = ?self.body.velocity,
                "body escaped the boundary, restoring initial state"
            );
            self.body = self.initial_body;
            report.escaped = true;
        }

        self.last_report = report;
        report
    }

    /// Feeds a frame delta into the accumulator and runs the fixed ticks it covers.
    ///
    /// Returns the number of ticks run. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        if !(frame_dt.is_finite() && frame_dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_dt;

        let mut substeps = 0u32;
        while self.accumulator >= self.fixed_dt && substeps < self.max_substeps {
            self.step(self.fixed_dt);
            self.accumulator -= self.fixed_dt;
            substeps += 1;
        }

        // Drop the backlog instead of spiralling
        if self.accumulator > self.fixed_dt * self.max_substeps as f64 {
            debug!(backlog = self.accumulator, "dropping timestep backlog");
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Restores the initial body and boundary and clears the tick counter.
    pub fn reset(&mut self) {
        self.body = self.initial_body;
        self.boundary = self.initial_boundary;
        self.accumulator = 0.0;
        self.ticks = 0;
        self.last_report = StepReport::default();
        info!("simulation reset");
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) -> SimResult<()> {
        self.boundary.set_angular_velocity(angular_velocity)
    }

    pub fn reverse_rotation(&mut self) {
        self.boundary.reverse_rotation();
    }

    /// Multiplies the spin rate by `factor`, e.g. 1.1 to speed up or 0.9 to slow down.
    pub fn scale_angular_velocity(&mut self, factor: f64) -> SimResult<()> {
        let factor = ensure_finite(factor, "angular velocity factor")?;
        self.boundary.set_angular_velocity(self.boundary.angular_velocity() * factor)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Current boundary vertices, in edge order.
    pub fn vertices(&self) -> Vec<Vec2> {
        self.boundary.vertices()
    }

    /// Ticks run since construction or the last [`Simulation::reset`].
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    pub fn interpolation_alpha(&self) -> f64 {
        (self.accumulator / self.fixed_dt).clamp(0.0, 1.0)
    }

    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.body.kinetic_energy()
    }
}
