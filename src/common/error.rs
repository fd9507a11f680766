//! Error type for everything that can be rejected before a simulation runs.
//!
//! Stepping never fails: once a `Body`, `Boundary` and `Material` exist they
//! are valid, and degenerate geometry during a tick is handled in place.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("body radius must be finite and > 0, got {0}")]
    InvalidRadius(f64),

    #[error("boundary circumradius must be finite and > 0, got {0}")]
    InvalidCircumradius(f64),

    #[error("boundary needs at least 3 sides, got {0}")]
    TooFewSides(usize),

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("timestep must be finite and > 0, got {0}")]
    InvalidTimestep(f64),

    #[error("body radius {radius} does not fit inside boundary (apothem {apothem})")]
    BodyDoesNotFit { radius: f64, apothem: f64 },

    #[error("body starts outside the boundary at ({x}, {y})")]
    BodyOutsideBoundary { x: f64, y: f64 },

    #[error("failed to read config {path:?}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("failed to write config: {0}")]
    ConfigSerialize(#[from] ron::Error),
}

pub type SimResult<T> = Result<T, SimError>;

/// Rejects NaN and infinities in a named construction parameter.
pub(crate) fn ensure_finite(value: f64, what: &'static str) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFinite(what))
    }
}
