// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Narrow-phase collision tests
//!
//! [`is_colliding`] dispatches on the pair of shape variants and appends one
//! [`Contact`] per manifold point. Every contact is oriented from the first
//! argument to the second, so swapping the operands yields the same points
//! with the endpoints swapped and the normal negated.

use super::Contact;
use crate::body::RigidBody;
use crate::shape::{clip_segment_to_line, CircleShape, PolygonShape};
use crate::storage::BodyHandle;

/// Test two bodies for overlap
///
/// Appends the manifold to `contacts` and returns `true` if at least one
/// contact was found. Unsupported shape pairings report no collision.
pub fn is_colliding(
    ha: BodyHandle,
    a: &RigidBody,
    hb: BodyHandle,
    b: &RigidBody,
    contacts: &mut Vec<Contact>,
) -> bool {
    let (sa, sb) = (a.shape(), b.shape());

    if let (Some(ca), Some(cb)) = (sa.as_circle(), sb.as_circle()) {
        return circle_circle(ha, a, ca, hb, b, cb, contacts);
    }

    if let (Some(pa), Some(pb)) = (sa.as_polygon(), sb.as_polygon()) {
        return polygon_polygon(ha, pa, hb, pb, contacts);
    }

    if let (Some(pa), Some(cb)) = (sa.as_polygon(), sb.as_circle()) {
        return polygon_circle(ha, pa, hb, b, cb, contacts);
    }

    if let (Some(ca), Some(pb)) = (sa.as_circle(), sb.as_polygon()) {
        let first = contacts.len();
        let colliding = polygon_circle(hb, pb, ha, a, ca, contacts);
        for contact in &mut contacts[first..] {
            *contact = contact.flipped();
        }
        return colliding;
    }

    false
}

fn circle_circle(
    ha: BodyHandle,
    a: &RigidBody,
    ca: &CircleShape,
    hb: BodyHandle,
    b: &RigidBody,
    cb: &CircleShape,
    contacts: &mut Vec<Contact>,
) -> bool {
    let ab = b.position() - a.position();
    let radius_sum = ca.radius + cb.radius;

    if ab.magnitude_squared() > radius_sum * radius_sum {
        return false;
    }

    let normal = ab.normalized();
    let start = b.position() - normal * cb.radius;
    let end = a.position() + normal * ca.radius;

    contacts.push(Contact {
        a: ha,
        b: hb,
        start,
        end,
        normal,
        depth: (end - start).magnitude(),
    });
    true
}

/// Separating axis test followed by reference-edge clipping
///
/// The polygon with the shallower penetration provides the reference edge;
/// the most anti-parallel edge of the other polygon is clipped against the
/// reference edge's side planes, producing up to two contacts.
fn polygon_polygon(
    ha: BodyHandle,
    pa: &PolygonShape,
    hb: BodyHandle,
    pb: &PolygonShape,
    contacts: &mut Vec<Contact>,
) -> bool {
    let (ab_separation, a_edge, _) = pa.find_min_separation(pb);
    if ab_separation >= 0.0 {
        return false;
    }

    let (ba_separation, b_edge, _) = pb.find_min_separation(pa);
    if ba_separation >= 0.0 {
        return false;
    }

    let (reference, incident, reference_edge, flipped) = if ab_separation > ba_separation {
        (pa, pb, a_edge, false)
    } else {
        (pb, pa, b_edge, true)
    };

    let normal = reference.edge_normal(reference_edge);

    let incident_edge = incident.find_incident_edge(normal);
    let incident_vertices = incident.world_vertices();
    let segment = [
        incident_vertices[incident_edge],
        incident_vertices[(incident_edge + 1) % incident_vertices.len()],
    ];

    let reference_vertices = reference.world_vertices();
    let v0 = reference_vertices[reference_edge];
    let v1 = reference_vertices[(reference_edge + 1) % reference_vertices.len()];
    let tangent = (v1 - v0).normalized();

    let clipped = clip_segment_to_line(segment, v0, -tangent);
    if clipped.len() < 2 {
        return false;
    }
    let clipped = clip_segment_to_line([clipped[0], clipped[1]], v1, tangent);
    if clipped.len() < 2 {
        return false;
    }

    let mut found = false;
    for point in clipped {
        let separation = (point - v0).dot(normal);
        if separation > 0.0 {
            continue;
        }

        let mut contact = Contact {
            a: ha,
            b: hb,
            start: point,
            end: point + normal * -separation,
            normal,
            depth: -separation,
        };
        if flipped {
            std::mem::swap(&mut contact.start, &mut contact.end);
            contact.normal = -contact.normal;
        }

        contacts.push(contact);
        found = true;
    }

    found
}

/// Polygon against circle, with the polygon as body A
fn polygon_circle(
    ha: BodyHandle,
    polygon: &PolygonShape,
    hb: BodyHandle,
    circle_body: &RigidBody,
    circle: &CircleShape,
    contacts: &mut Vec<Contact>,
) -> bool {
    let vertices = polygon.world_vertices();
    let center = circle_body.position();
    let radius = circle.radius;

    // Nearest edge: the first one the center lies outside of, or the one
    // with the least negative distance if the center is inside
    let mut is_outside = false;
    let mut distance_to_edge = f64::MIN;
    let mut curr_vertex = vertices[0];
    let mut next_vertex = vertices[1 % vertices.len()];

    for i in 0..vertices.len() {
        let normal = polygon.edge_normal(i);
        let projection = (center - vertices[i]).dot(normal);

        if projection > 0.0 {
            distance_to_edge = projection;
            curr_vertex = vertices[i];
            next_vertex = vertices[(i + 1) % vertices.len()];
            is_outside = true;
            break;
        }

        if projection > distance_to_edge {
            distance_to_edge = projection;
            curr_vertex = vertices[i];
            next_vertex = vertices[(i + 1) % vertices.len()];
        }
    }

    let edge_normal = (next_vertex - curr_vertex).perpendicular();

    let (normal, depth) = if !is_outside {
        (edge_normal, radius - distance_to_edge)
    } else if (center - curr_vertex).dot(next_vertex - curr_vertex) < 0.0 {
        // Corner region at the current vertex
        let to_center = center - curr_vertex;
        if to_center.magnitude() > radius {
            return false;
        }
        (to_center.normalized(), radius - to_center.magnitude())
    } else if (center - next_vertex).dot(curr_vertex - next_vertex) < 0.0 {
        // Corner region at the next vertex
        let to_center = center - next_vertex;
        if to_center.magnitude() > radius {
            return false;
        }
        (to_center.normalized(), radius - to_center.magnitude())
    } else {
        // Face region
        if distance_to_edge > radius {
            return false;
        }
        (edge_normal, radius - distance_to_edge)
    };

    let start = center - normal * radius;
    contacts.push(Contact {
        a: ha,
        b: hb,
        start,
        end: start + normal * depth,
        normal,
        depth,
    });
    true
}
