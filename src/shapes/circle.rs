use crate::math::vec2::Vec2;

/// A circular shape. The owning body's position is the circle center, so the
/// circle itself only carries its radius (and the squared radius, cached for
/// containment tests).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    radius_squared: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// Panics if the radius is not strictly positive.
    pub fn new(radius: f64) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "circle radius must be positive and finite, got {radius}"
        );
        Self {
            radius,
            radius_squared: radius * radius,
        }
    }

    pub fn radius_squared(&self) -> f64 {
        self.radius_squared
    }

    /// Whether the given world point lies strictly inside the circle
    /// centered at `center`.
    pub fn contains_point(&self, center: Vec2, point: Vec2) -> bool {
        center.distance_squared(point) < self.radius_squared
    }

    /// The minimum projection of the circle onto the axis direction `axis`:
    /// the center's coordinate minus the radius.
    pub fn min_coordinate_along(&self, center: Vec2, axis: Vec2) -> f64 {
        center.dot(axis) - self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(5.0);
        assert_eq!(c.radius, 5.0);
        assert_eq!(c.radius_squared(), 25.0);
    }

    #[test]
    #[should_panic]
    fn test_circle_new_zero_radius() {
        Circle::new(0.0);
    }

    #[test]
    #[should_panic]
    fn test_circle_new_negative_radius() {
        Circle::new(-1.0);
    }

    #[test]
    fn test_circle_contains_point() {
        let c = Circle::new(2.0);
        let center = Vec2::new(1.0, 1.0);
        assert!(c.contains_point(center, Vec2::new(1.0, 1.0)));
        assert!(c.contains_point(center, Vec2::new(2.5, 1.0)));
        // On the boundary counts as outside (strict comparison).
        assert!(!c.contains_point(center, Vec2::new(3.0, 1.0)));
        assert!(!c.contains_point(center, Vec2::new(4.0, 1.0)));
    }

    #[test]
    fn test_circle_min_coordinate_along() {
        let c = Circle::new(1.5);
        let center = Vec2::new(2.0, 3.0);
        assert!((c.min_coordinate_along(center, Vec2::new(1.0, 0.0)) - 0.5).abs() < EPSILON);
        assert!((c.min_coordinate_along(center, Vec2::new(0.0, 1.0)) - 1.5).abs() < EPSILON);
        assert!((c.min_coordinate_along(center, Vec2::new(-1.0, 0.0)) - -3.5).abs() < EPSILON);
    }
}
