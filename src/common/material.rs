//! Contact coefficients between the body and the boundary wall.

use crate::common::error::{SimError, SimResult};

/// How a bounce treats the relative velocity at the contact.
///
/// The two coefficients are independent: `restitution` scales the normal
/// component (and flips it), `friction_retain` scales the tangential one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Fraction of normal relative speed kept after a bounce. Range [0, 1].
    /// 0 = no rebound, 1 = perfectly elastic.
    restitution: f64,
    /// Fraction of tangential relative speed kept after a bounce. Range [0, 1].
    /// 1 = frictionless wall.
    friction_retain: f64,
}

impl Material {
    /// Creates a new material, rejecting coefficients outside [0, 1].
    pub fn new(restitution: f64, friction_retain: f64) -> SimResult<Self> {
        Ok(Material {
            restitution: unit_coefficient(restitution, "restitution")?,
            friction_retain: unit_coefficient(friction_retain, "friction_retain")?,
        })
    }

    /// Ideal mirror reflection: `e = 1, f = 1`.
    pub const ELASTIC: Material = Material {
        restitution: 1.0,
        friction_retain: 1.0,
    };

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn friction_retain(&self) -> f64 {
        self.friction_retain
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.9,
            friction_retain: 0.98,
        }
    }
}

fn unit_coefficient(value: f64, name: &'static str) -> SimResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::InvalidCoefficient { name, value })
    }
}
