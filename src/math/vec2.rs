use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the dot product of two vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (scalar). Equivalent to the z-component
    /// of the 3D cross product of the two vectors lifted into the xy-plane.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Calculates the squared magnitude (length) of the vector.
    /// Useful for comparisons as it avoids a square root.
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Calculates the magnitude (length) of the vector.
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the vector (unit vector).
    /// If the magnitude is zero, it returns a zero vector.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::ZERO
        } else {
            self * (1.0 / mag)
        }
    }

    /// Calculates the squared distance between two vector points.
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).magnitude_squared()
    }

    /// Calculates the distance between two vector points.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Returns a vector perpendicular to this vector (90-degree
    /// counter-clockwise rotation). For a scalar angular velocity w,
    /// `r.perpendicular() * w` is the velocity of a point at offset r
    /// from the rotation center (w x r).
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates the vector by a given angle (in radians).
    pub fn rotate(self, angle: f64) -> Self {
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        Self::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// Returns the angle of the vector in radians, measured from the
    /// positive x-axis.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns a vector with the same direction and the given magnitude.
    /// A zero vector stays zero.
    pub fn with_magnitude(self, magnitude: f64) -> Self {
        self.normalize() * magnitude
    }

    /// Returns a vector with the same magnitude at the given absolute angle.
    pub fn with_angle(self, angle: f64) -> Self {
        Self::from_angle(angle) * self.magnitude()
    }

    /// Clamps the magnitude to at most `max_magnitude`, preserving direction.
    pub fn limit_magnitude(self, max_magnitude: f64) -> Self {
        if self.magnitude_squared() > max_magnitude * max_magnitude {
            self.with_magnitude(max_magnitude)
        } else {
            self
        }
    }

    /// Creates a unit vector pointing at the given angle.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Creates a vector with the given angle and magnitude.
    pub fn from_angle_mag(angle: f64, magnitude: f64) -> Self {
        Self::from_angle(angle) * magnitude
    }

    /// Creates a unit vector with a uniformly random direction.
    pub fn from_rand_angle() -> Self {
        Self::from_angle(rand::random::<f64>() * std::f64::consts::TAU)
    }

    /// Creates a vector with a uniformly random direction and the given
    /// magnitude.
    pub fn from_rand_angle_mag(magnitude: f64) -> Self {
        Self::from_rand_angle() * magnitude
    }
}

// Implement Add trait
impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

// Implement Sub trait
impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

// Scalar multiplication (Vec2 * f64)
impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

// Scalar multiplication (f64 * Vec2)
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, vec: Vec2) -> Vec2 {
        vec * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}
