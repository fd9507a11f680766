use crate::math::vec2::Vec2;

/// Squared lengths below this are treated as a single point.
const DEGENERATE_LENGTH_SQ: f64 = 1e-12;

/// A boundary edge in world space, running from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Calculates the length of the line segment.
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Returns the direction vector of the line segment (from a to b).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction().magnitude_squared() < DEGENERATE_LENGTH_SQ
    }

    /// Finds the point on the segment closest to `point`.
    ///
    /// Returns the point and the clamped parameter `t` in [0, 1] with
    /// `closest = a + t * (b - a)`. A degenerate segment collapses to `a`
    /// with `t = 0`.
    pub fn closest_point(&self, point: Vec2) -> (Vec2, f64) {
        let segment_vec = self.direction();
        let length_sq = segment_vec.magnitude_squared();
        if length_sq < DEGENERATE_LENGTH_SQ {
            return (self.a, 0.0);
        }

        let t = ((point - self.a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
        (self.a + segment_vec * t, t)
    }

    /// Unit normal of the supporting line, oriented to the side containing `toward`.
    ///
    /// `None` for a degenerate segment. When `toward` lies on the line the
    /// counter-clockwise perpendicular `(-d.y, d.x)` is returned unchanged.
    pub fn normal_toward(&self, toward: Vec2) -> Option<Vec2> {
        if self.is_degenerate() {
            return None;
        }
        let normal = self.direction().perpendicular().try_normalize(0.0)?;
        if (toward - self.a).dot(normal) < 0.0 {
            Some(-normal)
        } else {
            Some(normal)
        }
    }
}
