pub mod body;
pub mod seed;
pub mod store;

pub use body::Body;
pub use seed::{CircularBodySeed, PolygonBodySeed};
pub use store::{BodyHandle, BodyStore};
