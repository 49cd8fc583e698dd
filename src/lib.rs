//! A 2D impulse-based rigid body physics core.
//!
//! Convex bodies (circles and polygons) advance under semi-implicit Euler,
//! interpenetrating pairs are detected by the narrow phase (separating axis
//! tests with incident-edge clipping for polygons), and contacts are
//! resolved with velocity impulses plus a positional split correction.
//!
//! The world type is [`Farm`]: bodies are grown from seed parameter bundles
//! and addressed through [`BodyHandle`]s.
//!
//! ```
//! use farm2d::{CircularBodySeed, Farm, Vec2};
//!
//! let mut farm = Farm::new();
//! let ball = farm.grow_circular(
//!     &CircularBodySeed::new(1.0)
//!         .position(Vec2::new(-2.0, 0.0))
//!         .velocity(Vec2::new(1.0, 0.0))
//!         .density(1.0),
//! );
//! farm.update(1.0 / 60.0);
//! assert!(farm.body(ball).position().x > -2.0);
//! ```

pub mod collision;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use collision::{BodyPair, Contact, ContactPoints};
pub use math::vec2::Vec2;
pub use objects::{Body, BodyHandle, BodyStore, CircularBodySeed, PolygonBodySeed};
pub use shapes::{Circle, Polygon, Shape};
pub use world::Farm;
