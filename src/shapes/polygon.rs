use crate::math::vec2::Vec2;

/// A convex polygon defined by vertices in body-local space, wound
/// counter-clockwise (standard y-up axes).
///
/// Each edge i runs from vertex i to vertex i+1 (wrapping). Its outward unit
/// normal is derived once at construction as the edge vector
/// `vertices[i] - vertices[i+1]` rotated 90 degrees counter-clockwise. With
/// counter-clockwise winding this points out of the polygon, and vertex i
/// attains the maximum projection along normal i over all vertices.
///
/// World-space vertices and normals are cached and refreshed from the owning
/// body's position and angle via [`Polygon::update_world`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    relative_vertices: Vec<Vec2>,
    relative_normals: Vec<Vec2>,
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from body-local vertices.
    ///
    /// Panics if fewer than 3 vertices are given, if any coordinate is
    /// non-finite, or if the vertices are not a strictly convex
    /// counter-clockwise loop. A clockwise loop would silently yield inward
    /// normals and inverted collisions, so it is rejected here.
    pub fn new(relative_vertices: Vec<Vec2>) -> Self {
        let n = relative_vertices.len();
        assert!(n >= 3, "polygon needs at least 3 vertices, got {n}");
        for v in &relative_vertices {
            assert!(
                v.x.is_finite() && v.y.is_finite(),
                "polygon vertex coordinates must be finite"
            );
        }

        let mut signed_area_doubled = 0.0;
        for i in 0..n {
            let a = relative_vertices[i];
            let b = relative_vertices[(i + 1) % n];
            signed_area_doubled += a.cross(b);

            // Strict convexity: every consecutive edge pair turns left.
            // This also rejects repeated vertices and collinear triples.
            let c = relative_vertices[(i + 2) % n];
            assert!(
                (b - a).cross(c - b) > 0.0,
                "polygon vertices must form a strictly convex counter-clockwise loop"
            );
        }
        assert!(
            signed_area_doubled > 0.0,
            "polygon vertices must be wound counter-clockwise"
        );

        let relative_normals: Vec<Vec2> = (0..n)
            .map(|i| {
                (relative_vertices[i] - relative_vertices[(i + 1) % n])
                    .perpendicular()
                    .normalize()
            })
            .collect();

        // World data starts as the identity transform; the owning body
        // refreshes it with its actual position and angle.
        let vertices = relative_vertices.clone();
        let normals = relative_normals.clone();

        Self {
            relative_vertices,
            relative_normals,
            vertices,
            normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.relative_vertices.len()
    }

    /// Body-local vertices, as given at construction.
    pub fn relative_vertices(&self) -> &[Vec2] {
        &self.relative_vertices
    }

    /// World-space vertices as of the last [`Polygon::update_world`].
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// World-space outward unit edge normals as of the last
    /// [`Polygon::update_world`].
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Recomputes world-space vertices and normals from the owning body's
    /// position and angle.
    pub fn update_world(&mut self, position: Vec2, angle: f64) {
        for i in 0..self.relative_vertices.len() {
            self.vertices[i] = self.relative_vertices[i].rotate(angle) + position;
            self.normals[i] = self.relative_normals[i].rotate(angle);
        }
    }

    /// The maximum projection of the polygon along edge normal
    /// `normal_index`. Realized by vertex `normal_index` itself, the left
    /// endpoint of that edge.
    pub fn max_coordinate_along_normal(&self, normal_index: usize) -> f64 {
        self.vertices[normal_index].dot(self.normals[normal_index])
    }

    /// The minimum projection of the polygon onto the axis direction `axis`.
    pub fn min_coordinate_along(&self, axis: Vec2) -> f64 {
        let mut min_coordinate = f64::INFINITY;
        for vertex in &self.vertices {
            let coordinate = vertex.dot(axis);
            if coordinate < min_coordinate {
                min_coordinate = coordinate;
            }
        }
        min_coordinate
    }

    /// Whether the world point lies on or inside every edge plane.
    pub fn contains_point(&self, point: Vec2) -> bool {
        for i in 0..self.vertices.len() {
            if point.dot(self.normals[i]) > self.max_coordinate_along_normal(i) {
                return false;
            }
        }
        true
    }

    /// The left endpoint (in winding order) of the edge carrying the given
    /// normal.
    pub fn vertex_left_of_normal(&self, normal_index: usize) -> Vec2 {
        self.vertices[normal_index]
    }

    /// The right endpoint (in winding order) of the edge carrying the given
    /// normal.
    pub fn vertex_right_of_normal(&self, normal_index: usize) -> Vec2 {
        self.vertices[(normal_index + 1) % self.vertices.len()]
    }
}
