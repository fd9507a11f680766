use crate::math::vec2::Vec2;

/// Which part of the boundary the body is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFeature {
    /// Interior of edge `i`, or one of its endpoints when only that edge reports it.
    Edge(usize),
    /// Vertex `k`, reported as the nearest point by both edges that meet there.
    Vertex(usize),
}

/// A detected penetration between the body and one boundary edge or vertex.
///
/// Lives for a single resolution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Edge that reported the contact. For a vertex contact, the deeper of the two.
    pub edge_index: usize,
    pub feature: ContactFeature,
    /// Point on the boundary nearest the body center.
    pub closest_point: Vec2,
    /// Unit normal pointing from the boundary toward the body.
    pub normal: Vec2,
    /// Distance from the body center to `closest_point`.
    pub distance: f64,
    /// `radius - distance`, always > 0 for a reported contact.
    pub penetration: f64,
}

impl Contact {
    pub fn is_vertex(&self) -> bool {
        matches!(self.feature, ContactFeature::Vertex(_))
    }
}
