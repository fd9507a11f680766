//! Velocity and position response against the moving wall.

use tracing::{debug, trace};

use super::contact::Contact;
use super::detection::{check_edge, deepest_contact};
use crate::common::Material;
use crate::math::vec2::Vec2;
use crate::objects::{Body, Boundary};
use crate::shapes::LineSegment;

/// Upper bound on edge sweeps in [`clamp_penetration`] for a center outside the polygon.
const MAX_CLAMP_PASSES: usize = 4;

/// Penetration below this is left alone by [`clamp_penetration`].
pub const CLAMP_SLOP: f64 = 1e-9;

/// What the resolver did with the contact it picked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub contact: Contact,
    /// Boundary velocity at the contact point.
    pub wall_velocity: Vec2,
    /// Relative velocity along the normal before the response. Negative means approaching.
    pub normal_speed: f64,
    /// False when the body was already separating and nothing was changed.
    pub applied: bool,
}

/// Resolves a single contact against the boundary.
///
/// Works in the wall's frame at the contact point: the relative velocity's
/// normal part is reversed and scaled by restitution, the tangential part is
/// scaled by friction retention, and the wall velocity is added back. The body
/// is then moved out along the normal until it just touches the wall.
///
/// Nothing happens when the relative normal velocity is not negative, so a
/// body grazing a wall while moving away is not reflected a second time.
pub fn resolve_contact(body: &mut Body, boundary: &Boundary, contact: &Contact, material: &Material) -> Resolution {
    let wall_velocity = boundary.wall_velocity_at(contact.closest_point);
    let relative_velocity = body.velocity - wall_velocity;
    let normal_speed = relative_velocity.dot(contact.normal);

    if normal_speed >= 0.0 {
        debug!(
            edge = contact.edge_index,
            normal_speed,
            penetration = contact.penetration,
            "contact separating, no response"
        );
        return Resolution {
            contact: *contact,
            wall_velocity,
            normal_speed,
            applied: false,
        };
    }

    let normal_part = relative_velocity.project_onto_unit(contact.normal);
    let tangent_part = relative_velocity - normal_part;

    let normal_after = normal_part * -material.restitution();
    let tangent_after = tangent_part * material.friction_retain();

    body.velocity = wall_velocity + normal_after + tangent_after;
    body.position += contact.normal * (body.radius() - contact.distance);

    debug!(
        edge = contact.edge_index,
        feature = ?contact.feature,
        normal_speed,
        penetration = contact.penetration,
        velocity = ?body.velocity,
        "contact resolved"
    );

    Resolution {
        contact: *contact,
        wall_velocity,
        normal_speed,
        applied: true,
    }
}

/// Finds the deepest contact (edge or corner) and resolves it.
///
/// At most one contact is handled per call; anything left over is picked up
/// by the next tick. Returns `None`, leaving the body untouched, when nothing
/// penetrates.
pub fn resolve_collisions(body: &mut Body, boundary: &Boundary, material: &Material) -> Option<Resolution> {
    let contact = deepest_contact(body, boundary)?;
    Some(resolve_contact(body, boundary, &contact, material))
}

/// Pushes the body out of any edge it still penetrates, without touching velocity.
///
/// With the center inside the polygon, the body is moved to the nearest point
/// of the inset polygon (edges pulled in by the radius), which clears every
/// edge at once, sharp corners included. A center already outside the polygon
/// gets a few ascending-order sweeps of per-edge push-out instead. Returns the
/// number of edges that needed correcting.
pub fn clamp_penetration(body: &mut Body, boundary: &Boundary) -> usize {
    let penetrated = (0..boundary.side_count())
        .filter(|&i| check_edge(body, boundary, i).map_or(false, |c| c.penetration > CLAMP_SLOP))
        .count();
    if penetrated == 0 {
        return 0;
    }

    if !boundary.contains(body.position) {
        return sweep_edges(body, boundary);
    }

    let target = nearest_inset_point(body.position, &boundary.inset_vertices(body.radius()));
    trace!(
        edges = penetrated,
        from = ?body.position,
        to = ?target,
        "clamped residual penetration"
    );
    body.position = target;
    penetrated
}

/// Nearest point to `p` on the outline of the convex polygon `vertices`.
fn nearest_inset_point(p: Vec2, vertices: &[Vec2]) -> Vec2 {
    let n = vertices.len();
    (0..n)
        .map(|i| LineSegment::new(vertices[i], vertices[(i + 1) % n]).closest_point(p).0)
        .fold(None::<(Vec2, f64)>, |best, q| {
            let d = q.distance(p);
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((q, d)),
            }
        })
        .map_or(p, |(q, _)| q)
}

fn sweep_edges(body: &mut Body, boundary: &Boundary) -> usize {
    let mut corrections = 0;
    for pass in 0..MAX_CLAMP_PASSES {
        let mut moved = false;
        for i in 0..boundary.side_count() {
            let Some(contact) = check_edge(body, boundary, i) else {
                continue;
            };
            if contact.penetration <= CLAMP_SLOP {
                continue;
            }
            body.position += contact.normal * contact.penetration;
            corrections += 1;
            moved = true;
            trace!(edge = i, pass, penetration = contact.penetration, "pushed escaped body off edge");
        }
        if !moved {
            break;
        }
    }
    corrections
}
