use crate::common::error::{ensure_finite, SimError, SimResult};
use crate::integration::integrator::{self, Drag};
use crate::math::vec2::Vec2;

/// The circular body bouncing inside the boundary.
///
/// Mass never enters the contact response (the wall is kinematic), so the body
/// is treated as a unit point mass with a collision radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// World position of the center.
    pub position: Vec2,
    /// World-frame linear velocity.
    pub velocity: Vec2,
    // Fixed for the body's lifetime, hence no setter.
    radius: f64,
}

impl Body {
    /// Creates a body, rejecting a non-positive radius or non-finite state.
    pub fn new(position: Vec2, velocity: Vec2, radius: f64) -> SimResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        ensure_finite(position.x, "body.position.x")?;
        ensure_finite(position.y, "body.position.y")?;
        ensure_finite(velocity.x, "body.velocity.x")?;
        ensure_finite(velocity.y, "body.velocity.y")?;
        Ok(Self {
            position,
            velocity,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Advances free flight by `dt`; see [`integrator::integrate`].
    pub fn integrate(&mut self, dt: f64, gravity: Vec2, drag: Drag) {
        integrator::integrate(self, dt, gravity, drag);
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Kinetic energy per unit mass, `|v|^2 / 2`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.velocity.magnitude_squared()
    }
}
