use tracing::trace;

use super::contact::{Contact, ContactFeature};
use crate::math::vec2::Vec2;
use crate::objects::{Body, Boundary};
use crate::shapes::LineSegment;

/// Center-to-boundary distances at or below this use a fallback normal.
pub const NORMAL_EPSILON: f64 = 1e-10;

/// Raw result of testing one edge, before corner classification.
#[derive(Debug, Clone, Copy)]
struct EdgeHit {
    contact: Contact,
    /// Clamped projection parameter along the edge.
    t: f64,
}

/// Unit normal from the boundary point `closest` toward the body center.
///
/// Falls back, in order, to the edge perpendicular facing the polygon's
/// interior, the direction from the body to the polygon center, and finally a
/// fixed +y axis.
fn contact_normal(position: Vec2, closest: Vec2, distance: f64, edge: &LineSegment, center: Vec2) -> Vec2 {
    if distance > NORMAL_EPSILON {
        return (position - closest) / distance;
    }
    edge.normal_toward(center)
        .or_else(|| (center - position).try_normalize(NORMAL_EPSILON))
        .unwrap_or(Vec2::new(0.0, 1.0))
}

fn check_edge_hit(body: &Body, boundary: &Boundary, edge_index: usize) -> Option<EdgeHit> {
    let edge = boundary.edge(edge_index);
    let (closest_point, t) = edge.closest_point(body.position);
    let distance = body.position.distance(closest_point);

    if distance >= body.radius() {
        return None;
    }

    let normal = contact_normal(body.position, closest_point, distance, &edge, boundary.center());
    let contact = Contact {
        edge_index,
        feature: ContactFeature::Edge(edge_index),
        closest_point,
        normal,
        distance,
        penetration: body.radius() - distance,
    };
    trace!(edge = edge_index, t, penetration = contact.penetration, "edge penetrated");
    Some(EdgeHit { contact, t })
}

/// Checks a single boundary edge against the body.
///
/// Returns `None` when the body center is at least one radius away from the
/// edge segment.
pub fn check_edge(body: &Body, boundary: &Boundary, edge_index: usize) -> Option<Contact> {
    check_edge_hit(body, boundary, edge_index).map(|hit| hit.contact)
}

/// All penetrating edges, in ascending edge order.
pub fn find_contacts(body: &Body, boundary: &Boundary) -> Vec<Contact> {
    (0..boundary.side_count())
        .filter_map(|i| check_edge(body, boundary, i))
        .collect()
}

/// The single contact to resolve this tick.
///
/// Picks the deepest penetrating edge (lowest index wins ties). When its
/// nearest point is an endpoint and the neighbouring edge sharing that
/// endpoint also reports it, the contact is promoted to the vertex itself so
/// the corner is resolved once with one normal.
pub fn deepest_contact(body: &Body, boundary: &Boundary) -> Option<Contact> {
    let n = boundary.side_count();
    let hits: Vec<Option<EdgeHit>> = (0..n).map(|i| check_edge_hit(body, boundary, i)).collect();

    let deepest = hits
        .iter()
        .flatten()
        .fold(None::<&EdgeHit>, |best, hit| match best {
            Some(b) if b.contact.penetration >= hit.contact.penetration => Some(b),
            _ => Some(hit),
        })?;

    let i = deepest.contact.edge_index;
    // (shared vertex, neighbouring edge, parameter the neighbour must report)
    let corner = if deepest.t <= 0.0 {
        Some((i, (i + n - 1) % n, 1.0))
    } else if deepest.t >= 1.0 {
        Some(((i + 1) % n, (i + 1) % n, 0.0))
    } else {
        None
    };

    if let Some((vertex_index, neighbour, neighbour_t)) = corner {
        let shared = hits[neighbour].map_or(false, |hit| hit.t == neighbour_t);
        if shared {
            return Some(vertex_contact(body, boundary, i, vertex_index));
        }
    }

    Some(deepest.contact)
}

fn vertex_contact(body: &Body, boundary: &Boundary, edge_index: usize, vertex_index: usize) -> Contact {
    let vertex = boundary.vertex(vertex_index);
    let distance = body.position.distance(vertex);
    let normal = (body.position - vertex)
        .try_normalize(NORMAL_EPSILON)
        .or_else(|| (boundary.center() - vertex).try_normalize(NORMAL_EPSILON))
        .unwrap_or(Vec2::new(0.0, 1.0));
    trace!(edge = edge_index, vertex = vertex_index, distance, "corner contact");

    Contact {
        edge_index,
        feature: ContactFeature::Vertex(vertex_index),
        closest_point: vertex,
        normal,
        distance,
        penetration: (body.radius() - distance).max(0.0),
    }
}
