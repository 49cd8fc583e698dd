//! Contact resolution: one velocity-impulse pass and one positional split
//! correction per contact point, applied in contact-list order.

use crate::collision::contact::Contact;
use crate::objects::body::Body;
use crate::objects::store::BodyStore;

/// Resolves every contact in list order. Contacts whose handles no longer
/// resolve (a body destroyed mid-tick) are skipped.
pub fn handle_contacts(store: &mut BodyStore, contacts: &[Contact]) {
    for contact in contacts {
        if let Some((body_a, body_b)) = store.get_disjoint_mut(contact.a, contact.b) {
            compute_and_apply_impulses(body_a, body_b, contact);
            move_apart(body_a, body_b, contact);
        }
    }
}

/// Applies a restitution impulse at each contact point where the bodies are
/// still approaching.
fn compute_and_apply_impulses(body_a: &mut Body, body_b: &mut Body, contact: &Contact) {
    let normal = contact.normal;

    for &point in contact.points.as_slice() {
        // Perpendicular contact offsets: scaled by the angular velocity they
        // give the rotational part of each point velocity (w x r).
        let offset_a = (point - body_a.position).perpendicular();
        let offset_b = (point - body_b.position).perpendicular();

        let point_velocity_a = body_a.velocity + offset_a * body_a.angular_velocity;
        let point_velocity_b = body_b.velocity + offset_b * body_b.angular_velocity;

        let approach_speed = (point_velocity_a - point_velocity_b).dot(normal);
        if approach_speed <= 0.0 {
            // Separating or tangent at this point.
            continue;
        }

        let restitution = body_a.restitution.min(body_b.restitution);

        // Effective-mass denominator; the inverse terms are zero on a
        // static side.
        let denominator = body_a.inverted_mass
            + body_b.inverted_mass
            + offset_a.dot(normal).powi(2) * body_a.inverted_moment_of_inertia
            + offset_b.dot(normal).powi(2) * body_b.inverted_moment_of_inertia;

        let magnitude = (1.0 + restitution) * approach_speed / denominator;
        let impulse = normal * magnitude;

        body_b.add_to_velocity(impulse * body_b.inverted_mass);
        body_b.add_to_angular_velocity(impulse.dot(offset_b) * body_b.inverted_moment_of_inertia);
        body_a.add_to_velocity(-impulse * body_a.inverted_mass);
        body_a.add_to_angular_velocity(-impulse.dot(offset_a) * body_a.inverted_moment_of_inertia);
    }
}

/// Separates the bodies along the contact normal by half the penetration
/// depth. A static side leaves the whole correction to the other body;
/// otherwise it splits by opposing mass proportions. Positions are mutated
/// directly; polygon world geometry refreshes at the next integration step,
/// which is fine because contacts are rebuilt from scratch every tick.
fn move_apart(body_a: &mut Body, body_b: &mut Body, contact: &Contact) {
    let correction = contact.normal * (0.5 * contact.depth);

    if body_a.is_static() {
        body_b.position += correction;
    } else if body_b.is_static() {
        body_a.position -= correction;
    } else {
        let total_mass = body_a.mass + body_b.mass;
        let proportion_a = body_b.mass / total_mass;
        let proportion_b = body_a.mass / total_mass;

        body_b.position += correction * proportion_b;
        body_a.position -= correction * proportion_a;
    }
}
