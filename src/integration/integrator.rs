use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::common::error::{SimError, SimResult};
use crate::math::vec2::Vec2;
use crate::objects::body::Body;

/// Velocity damping applied once per integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Drag {
    /// No damping.
    None,
    /// Multiply velocity by `factor` every tick, whatever `dt` is.
    /// Trajectories then depend on the tick rate.
    PerTick { factor: f64 },
    /// Multiply velocity by `exp(-rate * dt)`; independent of the tick rate.
    Exponential { rate: f64 },
}

impl Drag {
    /// Multiplicative velocity factor for a step of length `dt`.
    pub fn factor(self, dt: f64) -> f64 {
        match self {
            Drag::None => 1.0,
            Drag::PerTick { factor } => factor,
            Drag::Exponential { rate } => (-rate * dt).exp(),
        }
    }

    /// Checks that the law never adds energy: `factor` in [0, 1], `rate >= 0`.
    pub fn validate(self) -> SimResult<Self> {
        match self {
            Drag::None => Ok(self),
            Drag::PerTick { factor } => {
                if factor.is_finite() && (0.0..=1.0).contains(&factor) {
                    Ok(self)
                } else {
                    Err(SimError::InvalidCoefficient { name: "drag.factor", value: factor })
                }
            }
            Drag::Exponential { rate } => {
                if rate.is_finite() && rate >= 0.0 {
                    Ok(self)
                } else {
                    Err(SimError::InvalidCoefficient { name: "drag.rate", value: rate })
                }
            }
        }
    }
}

impl Default for Drag {
    /// Roughly 1% velocity loss per frame at 60 Hz.
    fn default() -> Self {
        Drag::Exponential { rate: 0.6 }
    }
}

/// Advances the body's free flight by `dt` with explicit Euler.
///
/// Order is fixed: gravity into velocity, then drag on velocity, then the new
/// velocity into position. A `dt` that is not finite and positive is a no-op.
pub fn integrate(body: &mut Body, dt: f64, gravity: Vec2, drag: Drag) {
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    body.velocity += gravity * dt;
    body.velocity *= drag.factor(dt);
    body.position += body.velocity * dt;
}

/// Wraps an angle in radians to the range [0, 2*PI).
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
