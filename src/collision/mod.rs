pub mod contact;
pub mod pair;
pub mod reporter;

// Re-export key types
pub use contact::{Contact, ContactPoints};
pub use pair::BodyPair;
