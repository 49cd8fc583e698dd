use crate::math::vec2::Vec2;

use std::f64::consts::PI;

/// Parameter bundle for growing a circular body.
///
/// Kinematic state defaults to rest at the origin and restitution to 0.5.
/// Mass properties must be supplied before growing: either explicitly, via
/// [`CircularBodySeed::density`], or with [`CircularBodySeed::make_static`].
#[derive(Debug, Clone)]
pub struct CircularBodySeed {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub angular_velocity: f64,
    pub restitution: f64,
    pub radius: f64,
    pub(crate) mass: f64,
    pub(crate) moment_of_inertia: f64,
}

impl CircularBodySeed {
    pub fn new(radius: f64) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            restitution: 0.5,
            radius,
            mass: 0.0,
            moment_of_inertia: 0.0,
        }
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Sets mass and moment of inertia directly.
    pub fn mass_and_moment_of_inertia(mut self, mass: f64, moment_of_inertia: f64) -> Self {
        self.mass = mass;
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    /// Derives mass and moment of inertia from a uniform density:
    /// m = rho * pi * r^2, I = m * r^2 / 2 (solid disc about its center).
    pub fn density(mut self, density: f64) -> Self {
        let area = self.radius * self.radius * PI;
        self.mass = density * area;
        self.moment_of_inertia = self.mass * self.radius * self.radius / 2.0;
        self
    }

    /// Gives the body infinite mass and inertia; it will never be moved by
    /// the solver.
    pub fn make_static(mut self) -> Self {
        self.mass = f64::INFINITY;
        self.moment_of_inertia = f64::INFINITY;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }
}

/// Parameter bundle for growing a polygon body.
///
/// Vertices are body-local offsets in counter-clockwise order. Kinematic
/// state defaults to rest at the origin and restitution to 0.5; mass
/// properties must be supplied before growing.
#[derive(Debug, Clone)]
pub struct PolygonBodySeed {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub angular_velocity: f64,
    pub restitution: f64,
    pub relative_vertices: Vec<Vec2>,
    pub(crate) mass: f64,
    pub(crate) moment_of_inertia: f64,
}

impl PolygonBodySeed {
    pub fn new(relative_vertices: Vec<Vec2>) -> Self {
        assert!(
            relative_vertices.len() >= 3,
            "polygon seed needs at least 3 vertices, got {}",
            relative_vertices.len()
        );
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            restitution: 0.5,
            relative_vertices,
            mass: 0.0,
            moment_of_inertia: 0.0,
        }
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Sets mass and moment of inertia directly.
    pub fn mass_and_moment_of_inertia(mut self, mass: f64, moment_of_inertia: f64) -> Self {
        self.mass = mass;
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    /// Derives mass and moment of inertia (about the body origin) from a
    /// uniform density using the shoelace accumulation over the edges. The
    /// result is positive for the required counter-clockwise winding.
    pub fn density(mut self, density: f64) -> Self {
        let mut mass_sum = 0.0;
        let mut inertia_sum = 0.0;

        let mut previous = self.relative_vertices.len() - 1;
        for i in 0..self.relative_vertices.len() {
            let a = self.relative_vertices[previous];
            let b = self.relative_vertices[i];
            let cross = a.cross(b);
            mass_sum += cross;
            inertia_sum += cross * (a.magnitude_squared() + a.dot(b) + b.magnitude_squared());
            previous = i;
        }

        self.mass = density * mass_sum / 2.0;
        self.moment_of_inertia = density * inertia_sum / 12.0;
        self
    }

    /// Gives the body infinite mass and inertia; it will never be moved by
    /// the solver.
    pub fn make_static(mut self) -> Self {
        self.mass = f64::INFINITY;
        self.moment_of_inertia = f64::INFINITY;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }
}
