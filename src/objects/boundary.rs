//! The rotating regular polygon that contains the body.

use std::f64::consts::{PI, TAU};

use crate::common::error::{ensure_finite, SimError, SimResult};
use crate::integration::integrator::wrap_angle;
use crate::math::vec2::Vec2;
use crate::shapes::LineSegment;

/// Regular convex polygon spinning about its fixed center at a constant rate.
///
/// Only `angle` changes over time. Vertex `k` sits at
/// `center + circumradius * (cos(angle + k*2PI/n), sin(angle + k*2PI/n))`, so
/// vertices run in order of increasing angle and edge `i` joins vertex `i` to
/// vertex `(i + 1) % n`. The interior is on the left of every edge
/// (`cross(b - a, p - a) > 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    center: Vec2,
    circumradius: f64,
    side_count: usize,
    angle: f64,
    angular_velocity: f64,
}

impl Boundary {
    /// Creates a boundary with rotation offset 0.
    pub fn new(center: Vec2, circumradius: f64, side_count: usize, angular_velocity: f64) -> SimResult<Self> {
        Self::with_angle(center, circumradius, side_count, angular_velocity, 0.0)
    }

    /// Creates a boundary starting at `initial_angle` radians (wrapped to [0, 2PI)).
    pub fn with_angle(
        center: Vec2,
        circumradius: f64,
        side_count: usize,
        angular_velocity: f64,
        initial_angle: f64,
    ) -> SimResult<Self> {
        if side_count < 3 {
            return Err(SimError::TooFewSides(side_count));
        }
        if !(circumradius.is_finite() && circumradius > 0.0) {
            return Err(SimError::InvalidCircumradius(circumradius));
        }
        ensure_finite(center.x, "boundary.center.x")?;
        ensure_finite(center.y, "boundary.center.y")?;
        ensure_finite(angular_velocity, "boundary.angular_velocity")?;
        ensure_finite(initial_angle, "boundary.initial_angle")?;

        Ok(Self {
            center,
            circumradius,
            side_count,
            angle: wrap_angle(initial_angle),
            angular_velocity,
        })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    pub fn side_count(&self) -> usize {
        self.side_count
    }

    /// Current rotation offset in [0, 2PI).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Signed spin rate in rad/s.
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Distance from the center to the middle of each edge.
    pub fn apothem(&self) -> f64 {
        self.circumradius * (PI / self.side_count as f64).cos()
    }

    /// Position of vertex `k` (taken modulo the side count).
    pub fn vertex(&self, k: usize) -> Vec2 {
        let k = k % self.side_count;
        let theta = self.angle + k as f64 * TAU / self.side_count as f64;
        self.center + Vec2::from_angle(theta) * self.circumradius
    }

    /// All vertex positions for the current angle, in edge order.
    pub fn vertices(&self) -> Vec<Vec2> {
        (0..self.side_count).map(|k| self.vertex(k)).collect()
    }

    /// Vertices of the polygon whose edges sit `margin` inside this one's.
    ///
    /// A circle of radius `margin` overlaps no edge exactly when its center is
    /// inside this inset polygon. Collapses to the center when `margin` reaches
    /// the apothem.
    pub fn inset_vertices(&self, margin: f64) -> Vec<Vec2> {
        let scale = ((self.apothem() - margin) / self.apothem()).max(0.0);
        (0..self.side_count)
            .map(|k| self.center + (self.vertex(k) - self.center) * scale)
            .collect()
    }

    /// Edge `i`, from vertex `i` to vertex `i + 1` (indices modulo the side count).
    pub fn edge(&self, i: usize) -> LineSegment {
        LineSegment::new(self.vertex(i), self.vertex(i + 1))
    }

    /// Edges in ascending index order.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        (0..self.side_count).map(move |i| self.edge(i))
    }

    /// Velocity of the boundary material point currently at world point `p`:
    /// `omega x (p - center)`.
    pub fn wall_velocity_at(&self, p: Vec2) -> Vec2 {
        (p - self.center).spin_velocity(self.angular_velocity)
    }

    /// True when `p` lies inside the polygon or on its outline.
    pub fn contains(&self, p: Vec2) -> bool {
        self.edges().all(|edge| edge.direction().cross(p - edge.a) >= 0.0)
    }

    /// Rotates the polygon by `angular_velocity * dt`. Non-positive `dt` is a no-op.
    pub fn advance(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.angle = wrap_angle(self.angle + self.angular_velocity * dt);
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) -> SimResult<()> {
        self.angular_velocity = ensure_finite(angular_velocity, "boundary.angular_velocity")?;
        Ok(())
    }

    /// Flips the spin direction.
    pub fn reverse_rotation(&mut self) {
        self.angular_velocity = -self.angular_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    const EPSILON: f64 = 1e-9;

    fn reference_hexagon(angular_velocity: f64) -> Boundary {
        Boundary::new(Vec2::new(400.0, 300.0), 200.0, 6, angular_velocity).unwrap()
    }

    #[test]
    fn test_boundary_rejects_bad_geometry() {
        assert!(matches!(
            Boundary::new(Vec2::ZERO, 10.0, 2, 0.0),
            Err(SimError::TooFewSides(2))
        ));
        assert!(matches!(
            Boundary::new(Vec2::ZERO, 0.0, 6, 0.0),
            Err(SimError::InvalidCircumradius(_))
        ));
        assert!(matches!(
            Boundary::new(Vec2::ZERO, -5.0, 6, 0.0),
            Err(SimError::InvalidCircumradius(_))
        ));
        assert!(Boundary::new(Vec2::ZERO, 10.0, 6, f64::NAN).is_err());
        assert!(Boundary::new(Vec2::new(f64::INFINITY, 0.0), 10.0, 6, 0.0).is_err());
    }

    #[test]
    fn test_vertices_reference_hexagon() {
        let hex = reference_hexagon(0.0);
        let vertices = hex.vertices();
        assert_eq!(vertices.len(), 6);

        assert!((vertices[0].x - 600.0).abs() < EPSILON);
        assert!((vertices[0].y - 300.0).abs() < EPSILON);
        assert!((vertices[3].x - 200.0).abs() < EPSILON);
        assert!((vertices[3].y - 300.0).abs() < EPSILON);
        // Vertex 4 at 240 degrees: (300, 300 - 100*sqrt(3))
        assert!((vertices[4].x - 300.0).abs() < EPSILON);
        assert!((vertices[4].y - (300.0 - 100.0 * 3f64.sqrt())).abs() < EPSILON);

        for v in &vertices {
            assert!((v.distance(hex.center()) - 200.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_edges_connect_consecutive_vertices() {
        let hex = reference_hexagon(0.0);
        let vertices = hex.vertices();
        for (i, edge) in hex.edges().enumerate() {
            assert_eq!(edge.a, vertices[i]);
            assert_eq!(edge.b, vertices[(i + 1) % 6]);
            // Regular hexagon: side length equals circumradius.
            assert!((edge.length() - 200.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_apothem() {
        let hex = reference_hexagon(0.0);
        assert!((hex.apothem() - 100.0 * 3f64.sqrt()).abs() < EPSILON);

        let square = Boundary::new(Vec2::ZERO, 2f64.sqrt(), 4, 0.0).unwrap();
        assert!((square.apothem() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_wall_velocity_at() {
        let hex = reference_hexagon(2.0);
        // Point 10 right of center: omega x r = (0, 20).
        let v = hex.wall_velocity_at(Vec2::new(410.0, 300.0));
        assert!(v.x.abs() < EPSILON);
        assert!((v.y - 20.0).abs() < EPSILON);
        // Point 10 below center (y down): omega x r = (-20, 0).
        let v = hex.wall_velocity_at(Vec2::new(400.0, 310.0));
        assert!((v.x + 20.0).abs() < EPSILON);
        assert!(v.y.abs() < EPSILON);
        // Center is fixed.
        assert_eq!(hex.wall_velocity_at(hex.center()), Vec2::ZERO);
        // Static boundary never moves.
        assert_eq!(reference_hexagon(0.0).wall_velocity_at(Vec2::new(12.0, -7.0)), Vec2::ZERO);
    }

    #[test]
    fn test_wall_velocity_matches_vertex_motion() {
        let mut hex = reference_hexagon(0.8);
        let before = hex.vertex(2);
        let expected = hex.wall_velocity_at(before);
        let dt = 1e-6;
        hex.advance(dt);
        let finite_difference = (hex.vertex(2) - before) / dt;
        assert!((finite_difference - expected).magnitude() < 1e-3);
    }

    #[test]
    fn test_advance_wraps_angle() {
        let mut hex = reference_hexagon(FRAC_PI_2);
        hex.advance(1.0);
        assert!((hex.angle() - FRAC_PI_2).abs() < EPSILON);
        hex.advance(3.0);
        // 4 * PI/2 = 2PI wraps to 0
        assert!(hex.angle() < EPSILON || (TAU - hex.angle()) < EPSILON);

        let mut backwards = reference_hexagon(-1.0);
        backwards.advance(0.5);
        assert!((backwards.angle() - (TAU - 0.5)).abs() < EPSILON);
    }

    #[test]
    fn test_advance_non_positive_dt_is_noop() {
        let mut hex = reference_hexagon(1.0);
        hex.advance(0.0);
        hex.advance(-1.0);
        assert_eq!(hex.angle(), 0.0);
    }

    #[test]
    fn test_with_angle_wraps() {
        let hex = Boundary::with_angle(Vec2::ZERO, 1.0, 5, 0.0, -FRAC_PI_2).unwrap();
        assert!((hex.angle() - 3.0 * FRAC_PI_2).abs() < EPSILON);
        let v0 = hex.vertex(0);
        assert!(v0.x.abs() < EPSILON);
        assert!((v0.y + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_contains() {
        let hex = reference_hexagon(0.0);
        assert!(hex.contains(hex.center()));
        assert!(hex.contains(Vec2::new(400.0, 140.0)));
        assert!(!hex.contains(Vec2::new(400.0, 100.0)));
        assert!(!hex.contains(Vec2::new(700.0, 300.0)));

        let mut spun = reference_hexagon(1.0);
        spun.advance(0.3);
        assert!(spun.contains(Vec2::new(400.0, 300.0 + spun.apothem() - 1.0)));
    }

    #[test]
    fn test_inset_vertices() {
        let mut hex = reference_hexagon(1.0);
        hex.advance(0.4);
        let inset = hex.inset_vertices(10.0);
        assert_eq!(inset.len(), 6);
        // Every inset edge runs parallel to its outer edge, 10 units further in.
        for i in 0..6 {
            let inner = LineSegment::new(inset[i], inset[(i + 1) % 6]);
            let (foot, _) = inner.closest_point(hex.center());
            assert!((foot.distance(hex.center()) - (hex.apothem() - 10.0)).abs() < EPSILON);
        }

        let collapsed = hex.inset_vertices(1000.0);
        assert!(collapsed.iter().all(|v| v.distance(hex.center()) < EPSILON));
    }

    #[test]
    fn test_rotation_controls() {
        let mut hex = reference_hexagon(0.5);
        hex.reverse_rotation();
        assert_eq!(hex.angular_velocity(), -0.5);
        hex.set_angular_velocity(1.25).unwrap();
        assert_eq!(hex.angular_velocity(), 1.25);
        assert!(hex.set_angular_velocity(f64::NAN).is_err());
        assert_eq!(hex.angular_velocity(), 1.25);
    }
}
