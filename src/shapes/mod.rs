pub mod circle;
pub mod polygon;

// Re-export the specific shape types
pub use circle::Circle;
pub use polygon::Polygon;

/// The geometry of a rigid body: a tagged variant instead of a class
/// hierarchy. Shape-specific queries dispatch on this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}
