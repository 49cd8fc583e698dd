use crate::math::vec2::Vec2;
use crate::objects::store::BodyHandle;

/// One or two world-space contact points, stored inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoints {
    points: [Vec2; 2],
    count: usize,
}

impl ContactPoints {
    pub fn one(point: Vec2) -> Self {
        Self {
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }

    pub fn two(first: Vec2, second: Vec2) -> Self {
        Self {
            points: [first, second],
            count: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points[..self.count]
    }
}

/// A reported interpenetration between two bodies, recomputed from scratch
/// every tick.
///
/// `a` is the reference body and `b` the incident body; for polygon pairs
/// the normal is an edge normal of the reference body. The normal is a unit
/// vector pointing from `a` toward `b`, and `depth > 0` is the penetration
/// along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub normal: Vec2,
    pub depth: f64,
    pub points: ContactPoints,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_points_one() {
        let points = ContactPoints::one(Vec2::new(1.0, 2.0));
        assert_eq!(points.len(), 1);
        assert_eq!(points.as_slice(), &[Vec2::new(1.0, 2.0)]);
    }

    #[test]
    fn test_contact_points_two() {
        let points = ContactPoints::two(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(points.len(), 2);
        assert_eq!(
            points.as_slice(),
            &[Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]
        );
    }
}
