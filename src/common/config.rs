//! RON-backed configuration for a simulation run.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! fields it changes:
//!
//! ```text
//! (
//!     boundary: (side_count: 8, angular_velocity: -1.0),
//!     physics: (drag: PerTick(factor: 0.995), restitution: 0.8),
//! )
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::error::{SimError, SimResult};
use crate::common::Material;
use crate::integration::Drag;
use crate::math::vec2::Vec2;
use crate::objects::{Body, Boundary};
use crate::world::StepParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub center: Vec2,
    pub circumradius: f64,
    pub side_count: usize,
    /// Radians per second, positive is counter-clockwise in a y-up frame.
    pub angular_velocity: f64,
    pub initial_angle: f64,
}
impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(400.0, 300.0),
            circumradius: 200.0,
            side_count: 6,
            angular_velocity: 0.5,
            initial_angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
}
impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            position: Vec2::new(400.0, 300.0),
            velocity: Vec2::new(150.0, -200.0),
            radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Units per second squared. The default points down the screen (y-down).
    pub gravity: Vec2,
    pub drag: Drag,
    pub restitution: f64,
    pub friction_retain: f64,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
            drag: Drag::default(),
            restitution: 0.9,
            friction_retain: 0.98,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestepConfig {
    pub fixed_dt: f64,
    /// Ticks allowed per `advance` call before the backlog is dropped.
    pub max_substeps: u32,
}
impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub boundary: BoundaryConfig,
    pub body: BodyConfig,
    pub physics: PhysicsConfig,
    pub timestep: TimestepConfig,
    /// Put the body back at its start state if it ever ends a tick outside the polygon.
    pub recover_escapes: bool,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            boundary: Default::default(),
            body: Default::default(),
            physics: Default::default(),
            timestep: Default::default(),
            recover_escapes: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(text: &str) -> SimResult<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    /// Loads `path`, falling back to [`SimulationConfig::default`] on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.as_ref().display(), error = %e, "using default config");
                Self::default()
            }
        }
    }

    /// Serializes to pretty-printed RON.
    pub fn to_ron_string(&self) -> SimResult<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn build_boundary(&self) -> SimResult<Boundary> {
        let b = &self.boundary;
        Boundary::with_angle(b.center, b.circumradius, b.side_count, b.angular_velocity, b.initial_angle)
    }

    pub fn build_body(&self) -> SimResult<Body> {
        Body::new(self.body.position, self.body.velocity, self.body.radius)
    }

    pub fn material(&self) -> SimResult<Material> {
        Material::new(self.physics.restitution, self.physics.friction_retain)
    }

    pub fn step_params(&self) -> SimResult<StepParams> {
        StepParams::new(self.physics.gravity, self.physics.drag, self.material()?)
    }

    /// Soft problems that do not stop a run but are probably not intended.
    pub fn warnings(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.timestep.max_substeps == 0 {
            w.push("timestep.max_substeps is 0; advance() will never tick".into());
        }
        if self.timestep.fixed_dt > 0.05 {
            w.push(format!(
                "timestep.fixed_dt {} is coarse; fast bodies may tunnel through edges",
                self.timestep.fixed_dt
            ));
        }
        if self.physics.restitution >= 1.0 && self.physics.friction_retain >= 1.0 && self.boundary.angular_velocity != 0.0 {
            w.push("lossless contacts with a spinning boundary; energy can grow without bound".into());
        }
        if matches!(self.physics.drag, Drag::PerTick { .. }) {
            w.push("drag is per-tick; trajectories depend on timestep.fixed_dt".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference_scenario() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.boundary.side_count, 6);
        assert_eq!(cfg.boundary.circumradius, 200.0);
        assert_eq!(cfg.boundary.center, Vec2::new(400.0, 300.0));
        assert_eq!(cfg.body.radius, 10.0);
        assert!(cfg.recover_escapes);
        assert!(cfg.build_boundary().is_ok());
        assert!(cfg.build_body().is_ok());
        assert!(cfg.step_params().is_ok());
        assert!(cfg.warnings().is_empty());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let cfg = SimulationConfig::from_ron_str(
            "(boundary: (side_count: 8, angular_velocity: -1.0), physics: (drag: PerTick(factor: 0.995)))",
        )
        .unwrap();
        assert_eq!(cfg.boundary.side_count, 8);
        assert_eq!(cfg.boundary.angular_velocity, -1.0);
        assert_eq!(cfg.boundary.circumradius, 200.0);
        assert_eq!(cfg.physics.drag, Drag::PerTick { factor: 0.995 });
        assert_eq!(cfg.physics.restitution, 0.9);
        assert_eq!(cfg.body, BodyConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut cfg = SimulationConfig::default();
        cfg.physics.drag = Drag::PerTick { factor: 0.99 };
        cfg.body.velocity = Vec2::new(-3.5, 12.0);
        let text = cfg.to_ron_string().unwrap();
        assert_eq!(SimulationConfig::from_ron_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SimulationConfig::from_ron_str("(boundary: (side_count: \"six\"))"),
            Err(SimError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("spinning_hexagon_no_such_config.ron");
        assert!(matches!(
            SimulationConfig::load_from_file(&path),
            Err(SimError::ConfigIo { .. })
        ));
        assert_eq!(SimulationConfig::load_or_default(&path), SimulationConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("spinning_hexagon_cfg_{}.ron", std::process::id()));
        fs::write(&path, "(recover_escapes: false, body: (radius: 4.0))").unwrap();
        let cfg = SimulationConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert!(!cfg.recover_escapes);
        assert_eq!(cfg.body.radius, 4.0);
    }

    #[test]
    fn test_invalid_values_rejected_on_build() {
        let mut cfg = SimulationConfig::default();
        cfg.physics.restitution = 1.5;
        assert!(matches!(cfg.step_params(), Err(SimError::InvalidCoefficient { .. })));

        let mut cfg = SimulationConfig::default();
        cfg.boundary.side_count = 2;
        assert!(cfg.build_boundary().is_err());
    }

    #[test]
    fn test_warnings() {
        let mut cfg = SimulationConfig::default();
        cfg.physics.restitution = 1.0;
        cfg.physics.friction_retain = 1.0;
        cfg.timestep.max_substeps = 0;
        assert_eq!(cfg.warnings().len(), 2);
    }
}
