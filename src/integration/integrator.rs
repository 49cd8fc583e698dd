use crate::math::vec2::Vec2;
use crate::objects::body::Body;

/// Integrates the body's state forward in time using semi-implicit Euler.
///
/// The velocity update consumes and clears the accumulated acceleration, and
/// the freshly updated velocity drives the position update (likewise for the
/// angular terms). Polygon world geometry is recomputed afterwards so shape
/// queries see the new transform.
///
/// Static bodies run the same routine; with no forces applied and zero
/// velocities their state does not change.
pub fn integrate(body: &mut Body, dt: f64) {
    // --- Linear motion --- //
    body.velocity += body.acceleration * dt;
    body.acceleration = Vec2::ZERO;
    body.position += body.velocity * dt;

    // --- Angular motion --- //
    body.angular_velocity += body.angular_acceleration * dt;
    body.angular_acceleration = 0.0;
    body.angle += body.angular_velocity * dt;

    body.refresh_world_shape();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon, Shape};
    const EPSILON: f64 = 1e-9;

    fn default_test_shape() -> Shape {
        Shape::Circle(Circle::new(1.0))
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut body = Body::new(default_test_shape(), 1.0, 1.0, 0.5);
        body.set_velocity(Vec2::new(10.0, -5.0));

        integrate(&mut body, 0.1);

        assert!((body.position().x - 1.0).abs() < EPSILON);
        assert!((body.position().y - -0.5).abs() < EPSILON);
        // Velocity unchanged without forces.
        assert_eq!(body.velocity(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_integrate_linear_motion_with_force() {
        let mut body = Body::new(default_test_shape(), 2.0, 1.0, 0.5);
        body.apply_force(Vec2::new(10.0, 0.0)); // a = (5, 0)
        let dt = 0.1;

        integrate(&mut body, dt);

        // v = a * dt, then p = v * dt (semi-implicit order).
        assert!((body.velocity().x - 0.5).abs() < EPSILON);
        assert!((body.position().x - 0.05).abs() < EPSILON);
        // The accumulator is consumed.
        assert_eq!(body.acceleration(), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_force_accumulator_cleared_each_step() {
        let mut body = Body::new(default_test_shape(), 1.0, 1.0, 0.5);
        body.apply_force(Vec2::new(1.0, 0.0));
        integrate(&mut body, 1.0);
        let velocity_after_first = body.velocity();
        // No new force: the velocity must stay where it was.
        integrate(&mut body, 1.0);
        assert_eq!(body.velocity(), velocity_after_first);
    }

    #[test]
    fn test_integrate_angular_motion() {
        let mut body = Body::new(default_test_shape(), 1.0, 2.0, 0.5);
        body.angular_acceleration = 3.0;
        let dt = 0.5;

        integrate(&mut body, dt);

        // omega = alpha * dt, theta = omega * dt.
        assert!((body.angular_velocity() - 1.5).abs() < EPSILON);
        assert!((body.angle() - 0.75).abs() < EPSILON);
        assert_eq!(body.angular_acceleration, 0.0);
    }

    #[test]
    fn test_integrate_static_body_stays_frozen() {
        let mut body = Body::new(default_test_shape(), f64::INFINITY, f64::INFINITY, 0.5);
        body.set_position(Vec2::new(1.0, 2.0));
        let before = body.clone();

        integrate(&mut body, 0.1);

        assert_eq!(body, before);
    }

    #[test]
    fn test_integrate_refreshes_polygon_world_vertices() {
        let shape = Shape::Polygon(Polygon::new(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]));
        let mut body = Body::new(shape, 1.0, 1.0, 0.5);
        body.set_velocity(Vec2::new(2.0, 0.0));
        body.set_angular_velocity(std::f64::consts::PI / 2.0);

        integrate(&mut body, 1.0);

        // Position advanced to (2, 0) and the square turned a quarter turn:
        // local (-1,-1) lands at world (2,0) + (1,-1).
        let polygon = body.polygon().unwrap();
        assert!((polygon.vertices()[0] - Vec2::new(3.0, -1.0)).magnitude() < EPSILON);
        assert!((polygon.normals()[0] - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
    }
}
