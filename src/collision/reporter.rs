//! Narrow-phase contact detection.
//!
//! Walks the world's body pairs and produces at most one [`Contact`] per
//! interpenetrating pair: circle/circle directly from center distance,
//! circle/polygon and polygon/polygon via the separating axis theorem over
//! polygon edge normals, with the polygon/polygon contact points obtained by
//! clipping the incident edge against the reference edge's side planes.

use crate::collision::contact::{Contact, ContactPoints};
use crate::collision::pair::BodyPair;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::objects::store::{BodyHandle, BodyStore};
use crate::shapes::{Circle, Polygon, Shape};

// Below this center distance two circles are treated as coincident and get
// an arbitrary fixed normal.
const COINCIDENT_DISTANCE: f64 = 1e-10;

/// Produces the contact list for one tick. Pairs whose bodies are both
/// static, or which do not interpenetrate, contribute nothing.
pub fn report(store: &BodyStore, pairs: &[BodyPair]) -> Vec<Contact> {
    pairs
        .iter()
        .filter_map(|pair| pair_contact(store, pair))
        .collect()
}

fn pair_contact(store: &BodyStore, pair: &BodyPair) -> Option<Contact> {
    let body_a = store.get(pair.a)?;
    let body_b = store.get(pair.b)?;

    if body_a.is_static() && body_b.is_static() {
        return None;
    }

    match (body_a.shape(), body_b.shape()) {
        (Shape::Circle(circle_a), Shape::Circle(circle_b)) => {
            circle_circle(pair.a, body_a, circle_a, pair.b, body_b, circle_b)
        }
        (Shape::Circle(circle), Shape::Polygon(polygon)) => {
            circle_polygon(pair.a, body_a, circle, pair.b, polygon)
        }
        (Shape::Polygon(polygon), Shape::Circle(circle)) => {
            circle_polygon(pair.b, body_b, circle, pair.a, polygon)
        }
        (Shape::Polygon(polygon_a), Shape::Polygon(polygon_b)) => {
            polygon_polygon(pair.a, body_a, polygon_a, pair.b, body_b, polygon_b)
        }
    }
}

fn circle_circle(
    handle_a: BodyHandle,
    body_a: &Body,
    circle_a: &Circle,
    handle_b: BodyHandle,
    body_b: &Body,
    circle_b: &Circle,
) -> Option<Contact> {
    let position_diff = body_b.position() - body_a.position();
    let dist_squared = position_diff.magnitude_squared();
    let radius_sum = circle_a.radius + circle_b.radius;
    if dist_squared >= radius_sum * radius_sum {
        return None;
    }

    let dist = dist_squared.sqrt();
    let depth = radius_sum - dist;
    let normal = if dist > COINCIDENT_DISTANCE {
        position_diff / dist
    } else {
        // Coincident centers: any direction works, pick a fixed one.
        Vec2::new(0.0, 1.0)
    };
    // The point on B's surface nearest A.
    let point = body_b.position() - normal * circle_b.radius;

    Some(Contact {
        a: handle_a,
        b: handle_b,
        normal,
        depth,
        points: ContactPoints::one(point),
    })
}

fn circle_polygon(
    circle_handle: BodyHandle,
    circle_body: &Body,
    circle: &Circle,
    polygon_handle: BodyHandle,
    polygon: &Polygon,
) -> Option<Contact> {
    let probe = sat_probe(polygon, circle_body)?;
    let normal = polygon.normals()[probe.normal_index];
    let point = circle_body.position() - normal * circle.radius;

    // The polygon supplies the normal, so it takes the reference role.
    Some(Contact {
        a: polygon_handle,
        b: circle_handle,
        normal,
        depth: probe.depth,
        points: ContactPoints::one(point),
    })
}

fn polygon_polygon(
    handle_a: BodyHandle,
    body_a: &Body,
    polygon_a: &Polygon,
    handle_b: BodyHandle,
    body_b: &Body,
    polygon_b: &Polygon,
) -> Option<Contact> {
    let probe_a = sat_probe(polygon_a, body_b)?;
    let probe_b = sat_probe(polygon_b, body_a)?;

    // The axis of minimum penetration across both bodies picks the
    // reference; A keeps the role unless B's axis is strictly shallower.
    let (reference_handle, reference_polygon, incident_handle, incident_polygon, best, worse) =
        if probe_b.depth < probe_a.depth {
            (handle_b, polygon_b, handle_a, polygon_a, probe_b, probe_a)
        } else {
            (handle_a, polygon_a, handle_b, polygon_b, probe_a, probe_b)
        };

    let reference_left = reference_polygon.vertex_left_of_normal(best.normal_index);
    let reference_right = reference_polygon.vertex_right_of_normal(best.normal_index);
    let incident_left = incident_polygon.vertex_left_of_normal(worse.normal_index);
    let incident_right = incident_polygon.vertex_right_of_normal(worse.normal_index);
    let reference_normal = reference_polygon.normals()[best.normal_index];

    let points = clip_incident_edge(
        reference_left,
        reference_right,
        incident_left,
        incident_right,
        reference_normal,
    );

    Some(Contact {
        a: reference_handle,
        b: incident_handle,
        normal: reference_normal,
        depth: best.depth,
        points,
    })
}

/// The axis of minimum penetration among one polygon's edge normals.
#[derive(Debug, Clone, Copy)]
struct SatProbe {
    normal_index: usize,
    depth: f64,
}

/// Tests every edge normal of `considered` as a candidate separating axis
/// against `other`. Returns `None` as soon as a separating axis exists
/// (penetration <= 0 along it); otherwise the shallowest axis wins, lower
/// index first on ties.
fn sat_probe(considered: &Polygon, other: &Body) -> Option<SatProbe> {
    let mut depth = f64::INFINITY;
    let mut normal_index = 0;

    for i in 0..considered.vertex_count() {
        let edge_coordinate = considered.max_coordinate_along_normal(i);
        let min_coordinate = other.min_coordinate_along(considered.normals()[i]);

        let proposed_depth = edge_coordinate - min_coordinate;
        if proposed_depth <= 0.0 {
            return None;
        }
        if proposed_depth < depth {
            depth = proposed_depth;
            normal_index = i;
        }
    }

    Some(SatProbe {
        normal_index,
        depth,
    })
}

/// Trims the incident edge to the reference edge's span along the edge
/// tangent, then discards at most one point sitting on the non-penetrating
/// side of the reference face. Yields one or two points.
fn clip_incident_edge(
    reference_left: Vec2,
    reference_right: Vec2,
    incident_left: Vec2,
    incident_right: Vec2,
    reference_normal: Vec2,
) -> ContactPoints {
    let tangent = (reference_right - reference_left).normalize();

    // The incident edge faces the reference edge, so its right endpoint
    // lies near the reference left endpoint and vice versa. Pull each
    // endpoint that overshoots the span back toward its partner, onto the
    // violated side plane.
    let clipped_right = constrain_point(incident_right, reference_left, tangent, incident_left);
    let clipped_left = constrain_point(incident_left, reference_right, -tangent, incident_right);

    drop_point_behind_face(clipped_left, clipped_right, reference_left, -reference_normal)
}

/// Keeps `point` unless its coordinate along `outward` falls below the side
/// plane through `edge_point`; a violating point is replaced by the
/// interpolation toward `partner` that lies exactly on the plane.
fn constrain_point(point: Vec2, edge_point: Vec2, outward: Vec2, partner: Vec2) -> Vec2 {
    let edge_coordinate = edge_point.dot(outward);
    let relative = point.dot(outward) - edge_coordinate;
    if relative < 0.0 {
        let partner_relative = partner.dot(outward) - edge_coordinate;
        point + (partner - point) * (relative / (relative - partner_relative))
    } else {
        point
    }
}

/// Removes at most one candidate point that lies on the non-penetrating
/// side of the reference face (`inward` is the flipped reference normal).
fn drop_point_behind_face(
    point_a: Vec2,
    point_b: Vec2,
    edge_point: Vec2,
    inward: Vec2,
) -> ContactPoints {
    let edge_coordinate = edge_point.dot(inward);

    if point_a.dot(inward) < edge_coordinate {
        return ContactPoints::one(point_b);
    }
    if point_b.dot(inward) < edge_coordinate {
        return ContactPoints::one(point_a);
    }
    ContactPoints::two(point_a, point_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::body::Body;
    use crate::shapes::Shape;
    const EPSILON: f64 = 1e-9;

    fn circle_body(radius: f64, position: Vec2) -> Body {
        let mut body = Body::new(Shape::Circle(Circle::new(radius)), 1.0, 1.0, 0.5);
        body.set_position(position);
        body
    }

    fn square_body(half_extent: f64, position: Vec2, angle: f64) -> Body {
        let hw = half_extent;
        let shape = Shape::Polygon(Polygon::new(vec![
            Vec2::new(-hw, -hw),
            Vec2::new(hw, -hw),
            Vec2::new(hw, hw),
            Vec2::new(-hw, hw),
        ]));
        let mut body = Body::new(shape, 1.0, 1.0, 0.5);
        body.set_position(position);
        body.set_angle(angle);
        body
    }

    fn static_square_body(half_extent: f64, position: Vec2) -> Body {
        let hw = half_extent;
        let shape = Shape::Polygon(Polygon::new(vec![
            Vec2::new(-hw, -hw),
            Vec2::new(hw, -hw),
            Vec2::new(hw, hw),
            Vec2::new(-hw, hw),
        ]));
        let mut body = Body::new(shape, f64::INFINITY, f64::INFINITY, 0.5);
        body.set_position(position);
        body
    }

    fn report_single(store: &BodyStore, pair: BodyPair) -> Vec<Contact> {
        report(store, &[pair])
    }

    #[test]
    fn test_both_static_pair_is_skipped() {
        let mut store = BodyStore::new();
        // Heavily overlapping, but both static.
        let a = store.insert(static_square_body(1.0, Vec2::ZERO));
        let b = store.insert(static_square_body(1.0, Vec2::new(0.5, 0.0)));
        assert!(report_single(&store, BodyPair::new(a, b)).is_empty());
    }

    #[test]
    fn test_circle_circle_separated() {
        let mut store = BodyStore::new();
        let a = store.insert(circle_body(1.0, Vec2::ZERO));
        let b = store.insert(circle_body(1.0, Vec2::new(3.0, 0.0)));
        assert!(report_single(&store, BodyPair::new(a, b)).is_empty());
    }

    #[test]
    fn test_circle_circle_touching_is_no_contact() {
        let mut store = BodyStore::new();
        let a = store.insert(circle_body(1.0, Vec2::ZERO));
        let b = store.insert(circle_body(1.0, Vec2::new(2.0, 0.0)));
        assert!(report_single(&store, BodyPair::new(a, b)).is_empty());
    }

    #[test]
    fn test_circle_circle_overlapping() {
        let mut store = BodyStore::new();
        let a = store.insert(circle_body(1.0, Vec2::ZERO));
        let b = store.insert(circle_body(1.0, Vec2::new(1.5, 0.0)));

        let contacts = report_single(&store, BodyPair::new(a, b));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        assert_eq!(contact.a, a);
        assert_eq!(contact.b, b);
        // Normal points from A toward B.
        assert!((contact.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert!((contact.depth - 0.5).abs() < EPSILON);
        // Contact point sits on B's surface nearest A.
        assert_eq!(contact.points.len(), 1);
        assert!((contact.points.as_slice()[0] - Vec2::new(0.5, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_circle_circle_coincident_centers() {
        let mut store = BodyStore::new();
        let a = store.insert(circle_body(2.0, Vec2::new(1.0, 1.0)));
        let b = store.insert(circle_body(1.0, Vec2::new(1.0, 1.0)));

        let contacts = report_single(&store, BodyPair::new(a, b));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        assert!((contact.depth - 3.0).abs() < EPSILON);
        // The arbitrary fallback normal.
        assert!((contact.normal - Vec2::new(0.0, 1.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_circle_polygon_separated() {
        let mut store = BodyStore::new();
        let circle = store.insert(circle_body(0.5, Vec2::new(3.0, 0.0)));
        let square = store.insert(square_body(1.0, Vec2::ZERO, 0.0));
        assert!(report_single(&store, BodyPair::new(circle, square)).is_empty());
    }

    #[test]
    fn test_circle_polygon_overlapping() {
        let mut store = BodyStore::new();
        let circle = store.insert(circle_body(0.5, Vec2::new(1.4, 0.0)));
        let square = store.insert(square_body(1.0, Vec2::ZERO, 0.0));

        let contacts = report_single(&store, BodyPair::new(circle, square));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        // The polygon supplies the normal and takes the reference role.
        assert_eq!(contact.a, square);
        assert_eq!(contact.b, circle);
        assert!((contact.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert!((contact.depth - 0.1).abs() < EPSILON);
        assert_eq!(contact.points.len(), 1);
        assert!((contact.points.as_slice()[0] - Vec2::new(0.9, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_circle_polygon_role_independent_of_pair_order() {
        let mut store = BodyStore::new();
        let circle = store.insert(circle_body(0.5, Vec2::new(1.4, 0.0)));
        let square = store.insert(square_body(1.0, Vec2::ZERO, 0.0));

        let forward = report_single(&store, BodyPair::new(circle, square));
        let swapped = report_single(&store, BodyPair::new(square, circle));
        assert_eq!(forward.len(), 1);
        assert_eq!(swapped.len(), 1);
        assert_eq!(forward[0].a, swapped[0].a);
        assert_eq!(forward[0].b, swapped[0].b);
        assert!((forward[0].normal - swapped[0].normal).magnitude() < EPSILON);
        assert!((forward[0].depth - swapped[0].depth).abs() < EPSILON);
    }

    #[test]
    fn test_circle_inside_static_square() {
        // A fully contained circle still yields the shallowest face normal.
        let mut store = BodyStore::new();
        let circle = store.insert(circle_body(1.0, Vec2::new(4.0, 0.0)));
        let square = store.insert(static_square_body(1.0, Vec2::new(4.0, 0.0)));

        let contacts = report_single(&store, BodyPair::new(circle, square));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        // All four faces tie at depth 2; the lowest-index normal wins.
        assert!((contact.depth - 2.0).abs() < EPSILON);
        assert!((contact.normal - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_polygon_polygon_separated() {
        let mut store = BodyStore::new();
        let a = store.insert(square_body(1.0, Vec2::ZERO, 0.0));
        let b = store.insert(square_body(1.0, Vec2::new(2.5, 0.0), 0.0));
        assert!(report_single(&store, BodyPair::new(a, b)).is_empty());
    }

    #[test]
    fn test_polygon_polygon_edge_overlap_two_points() {
        let mut store = BodyStore::new();
        let a = store.insert(square_body(1.0, Vec2::ZERO, 0.0));
        let b = store.insert(square_body(1.0, Vec2::new(1.5, 0.0), 0.0));

        let contacts = report_single(&store, BodyPair::new(a, b));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        // Equal depths on both probes: A keeps the reference role.
        assert_eq!(contact.a, a);
        assert_eq!(contact.b, b);
        assert!((contact.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert!((contact.depth - 0.5).abs() < EPSILON);
        // The full incident edge survives clipping.
        assert_eq!(contact.points.len(), 2);
        let points = contact.points.as_slice();
        assert!((points[0] - Vec2::new(0.5, 1.0)).magnitude() < EPSILON);
        assert!((points[1] - Vec2::new(0.5, -1.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_polygon_polygon_swapped_order_flips_roles() {
        let mut store = BodyStore::new();
        let a = store.insert(square_body(1.0, Vec2::ZERO, 0.0));
        let b = store.insert(square_body(1.0, Vec2::new(1.8, 0.0), 0.0));

        let forward = report_single(&store, BodyPair::new(a, b));
        let swapped = report_single(&store, BodyPair::new(b, a));
        assert_eq!(forward.len(), 1);
        assert_eq!(swapped.len(), 1);
        // Reference/incident swap, the depth is identical and the normal
        // flips sign.
        assert_eq!(forward[0].a, a);
        assert_eq!(swapped[0].a, b);
        assert!((forward[0].depth - swapped[0].depth).abs() < EPSILON);
        assert!((forward[0].normal + swapped[0].normal).magnitude() < EPSILON);
    }

    #[test]
    fn test_polygon_polygon_corner_contact_single_point() {
        let mut store = BodyStore::new();
        let a = store.insert(square_body(1.0, Vec2::ZERO, 0.0));
        // Rotated 45 degrees; its left corner reaches x = 2.2 - sqrt(2).
        let b = store.insert(square_body(
            1.0,
            Vec2::new(2.2, 0.0),
            std::f64::consts::PI / 4.0,
        ));

        let contacts = report_single(&store, BodyPair::new(a, b));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        let expected_depth = 1.0 - (2.2 - 2.0f64.sqrt());
        assert_eq!(contact.a, a);
        assert!((contact.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert!((contact.depth - expected_depth).abs() < EPSILON);
        // Only the penetrating corner survives the face check.
        assert_eq!(contact.points.len(), 1);
        let corner = Vec2::new(2.2 - 2.0f64.sqrt(), 0.0);
        assert!((contact.points.as_slice()[0] - corner).magnitude() < EPSILON);
    }

    #[test]
    fn test_clipped_points_lie_in_reference_span() {
        let mut store = BodyStore::new();
        let a = store.insert(square_body(1.0, Vec2::ZERO, 0.0));
        // Offset upward so one incident endpoint overshoots the span.
        let b = store.insert(square_body(1.0, Vec2::new(1.5, 0.8), 0.2));

        let contacts = report_single(&store, BodyPair::new(a, b));
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        let reference = store.get(contact.a).unwrap().polygon().unwrap().clone();

        // Recover the reference edge for the reported normal.
        let index = reference
            .normals()
            .iter()
            .position(|n| (*n - contact.normal).magnitude() < EPSILON)
            .unwrap();
        let left = reference.vertex_left_of_normal(index);
        let right = reference.vertex_right_of_normal(index);
        let tangent = (right - left).normalize();

        for point in contact.points.as_slice() {
            let coordinate = point.dot(tangent);
            assert!(coordinate >= left.dot(tangent) - EPSILON);
            assert!(coordinate <= right.dot(tangent) + EPSILON);
            // On the penetrating side of the reference face.
            assert!(point.dot(contact.normal) <= left.dot(contact.normal) + EPSILON);
        }
    }

    #[test]
    fn test_sat_probe_lower_index_wins_ties() {
        // A square concentric with a bigger square ties on all four axes.
        let mut store = BodyStore::new();
        let a = store.insert(square_body(2.0, Vec2::ZERO, 0.0));
        let b = store.insert(square_body(1.0, Vec2::ZERO, 0.0));

        let contacts = report_single(&store, BodyPair::new(a, b));
        assert_eq!(contacts.len(), 1);
        // Depth ties at 3 on every axis of A (and B); index 0 wins, so the
        // normal is A's bottom face normal.
        assert!((contacts[0].normal - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
    }
}
