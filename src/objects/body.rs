use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Polygon, Shape};

/// A rigid 2D body: a shape plus kinematic state and mass properties.
///
/// A body is static when its mass is infinite. Inverse mass and inverse
/// moment of inertia are stored explicitly (zero for static bodies) so the
/// solver never chains arithmetic through IEEE infinities.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) shape: Shape,

    // Kinematic state
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) acceleration: Vec2,
    pub(crate) angle: f64,
    pub(crate) angular_velocity: f64,
    pub(crate) angular_acceleration: f64,

    // Mass properties
    pub(crate) mass: f64,
    pub(crate) inverted_mass: f64,
    pub(crate) moment_of_inertia: f64,
    pub(crate) inverted_moment_of_inertia: f64,

    pub(crate) restitution: f64,
}

impl Body {
    /// Creates a body at the origin with zero velocity.
    ///
    /// Panics unless either both mass and moment of inertia are positive and
    /// finite (a dynamic body) or both are infinite (a static body), or if
    /// the coefficient of restitution falls outside [0, 1].
    pub fn new(shape: Shape, mass: f64, moment_of_inertia: f64, restitution: f64) -> Self {
        let is_static = mass == f64::INFINITY;
        if is_static {
            assert!(
                moment_of_inertia == f64::INFINITY,
                "a static body needs infinite moment of inertia as well"
            );
        } else {
            assert!(
                mass > 0.0 && mass.is_finite(),
                "dynamic body mass must be positive and finite, got {mass}"
            );
            assert!(
                moment_of_inertia > 0.0 && moment_of_inertia.is_finite(),
                "dynamic body moment of inertia must be positive and finite, got {moment_of_inertia}"
            );
        }
        assert!(
            (0.0..=1.0).contains(&restitution),
            "coefficient of restitution must lie in [0, 1], got {restitution}"
        );

        let inverted_mass = if is_static { 0.0 } else { 1.0 / mass };
        let inverted_moment_of_inertia = if is_static { 0.0 } else { 1.0 / moment_of_inertia };

        let mut body = Self {
            shape,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            mass,
            inverted_mass,
            moment_of_inertia,
            inverted_moment_of_inertia,
            restitution,
        };
        body.refresh_world_shape();
        body
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The circle variant of the shape, if this body is circular.
    pub fn circle(&self) -> Option<&Circle> {
        match &self.shape {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// The polygon variant of the shape, if this body is polygonal.
    pub fn polygon(&self) -> Option<&Polygon> {
        match &self.shape {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inverted_mass(&self) -> f64 {
        self.inverted_mass
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Whether this body has infinite mass and is never moved by the solver.
    pub fn is_static(&self) -> bool {
        self.inverted_mass == 0.0
    }

    /// Moves the body, keeping any polygon world geometry in sync.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_world_shape();
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Re-orients the body, keeping any polygon world geometry in sync.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.refresh_world_shape();
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    pub fn add_to_velocity(&mut self, velocity_change: Vec2) {
        self.velocity += velocity_change;
    }

    pub fn add_to_angular_velocity(&mut self, angular_velocity_change: f64) {
        self.angular_velocity += angular_velocity_change;
    }

    /// Accumulates a force into the acceleration; the accumulator is cleared
    /// by the next integration step. Forces must not be applied to static
    /// bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        debug_assert!(!self.is_static(), "cannot apply a force to a static body");
        self.acceleration += force * self.inverted_mass;
    }

    /// Whether the given world point lies inside the body's shape.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match &self.shape {
            Shape::Circle(circle) => circle.contains_point(self.position, point),
            Shape::Polygon(polygon) => polygon.contains_point(point),
        }
    }

    /// The minimum projection of the body's shape onto the axis direction.
    pub fn min_coordinate_along(&self, axis: Vec2) -> f64 {
        match &self.shape {
            Shape::Circle(circle) => circle.min_coordinate_along(self.position, axis),
            Shape::Polygon(polygon) => polygon.min_coordinate_along(axis),
        }
    }

    /// Recomputes shape data derived from position and angle. A no-op for
    /// circles.
    pub(crate) fn refresh_world_shape(&mut self) {
        let (position, angle) = (self.position, self.angle);
        if let Shape::Polygon(polygon) = &mut self.shape {
            polygon.update_world(position, angle);
        }
    }
}
