//! One tick of the simulation.

use tracing::trace;

use crate::collision::{clamp_penetration, resolve_collisions, Contact};
use crate::common::error::{ensure_finite, SimResult};
use crate::common::Material;
use crate::integration::Drag;
use crate::math::vec2::Vec2;
use crate::objects::{Body, Boundary};

/// Environment constants applied on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    gravity: Vec2,
    drag: Drag,
    material: Material,
}

impl StepParams {
    pub fn new(gravity: Vec2, drag: Drag, material: Material) -> SimResult<Self> {
        ensure_finite(gravity.x, "gravity.x")?;
        ensure_finite(gravity.y, "gravity.y")?;
        Ok(Self {
            gravity,
            drag: drag.validate()?,
            material,
        })
    }

    /// Weightless, undamped and perfectly elastic.
    pub fn frictionless() -> Self {
        Self {
            gravity: Vec2::ZERO,
            drag: Drag::None,
            material: Material::ELASTIC,
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn drag(&self) -> Drag {
        self.drag
    }

    pub fn material(&self) -> Material {
        self.material
    }
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
            drag: Drag::default(),
            material: Material::default(),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// The contact picked by the resolver, if the body penetrated anything.
    pub contact: Option<Contact>,
    /// True when the contact was approaching and the velocity was rewritten.
    pub impulse_applied: bool,
    /// Wall velocity at the contact point, when there was a contact.
    pub wall_velocity: Option<Vec2>,
    /// Positional corrections made by the residual penetration clamp.
    pub clamp_corrections: usize,
    /// Set by [`Simulation`](crate::world::Simulation) when the body left the
    /// polygon and was put back at its initial state.
    pub escaped: bool,
}

impl StepReport {
    pub fn had_contact(&self) -> bool {
        self.contact.is_some()
    }
}

/// Advances `body` and `boundary` by `dt` in place.
///
/// Runs, in order: boundary rotation, body integration, resolution of the
/// single deepest contact, and a position-only clamp of any penetration left
/// over. A `dt` that is not finite and positive leaves both untouched.
pub fn step_in_place(body: &mut Body, boundary: &mut Boundary, dt: f64, params: &StepParams) -> StepReport {
    let mut report = StepReport::default();
    if !(dt.is_finite() && dt > 0.0) {
        return report;
    }

    boundary.advance(dt);
    body.integrate(dt, params.gravity, params.drag);

    if let Some(resolution) = resolve_collisions(body, boundary, &params.material) {
        report.contact = Some(resolution.contact);
        report.impulse_applied = resolution.applied;
        report.wall_velocity = Some(resolution.wall_velocity);
    }

    report.clamp_corrections = clamp_penetration(body, boundary);

    trace!(
        position = ?body.position,
        velocity = ?body.velocity,
        angle = boundary.angle(),
        contact = report.had_contact(),
        "tick"
    );
    report
}

/// Pure form of [`step_in_place`]: maps `(body, boundary)` to their state after `dt`.
pub fn step(mut body: Body, mut boundary: Boundary, dt: f64, params: &StepParams) -> (Body, Boundary) {
    step_in_place(&mut body, &mut boundary, dt, params);
    (body, boundary)
}
