//! Adapters implementing the crate's ports.

pub mod entropy;
pub mod seeded;

pub use entropy::EntropySource;
pub use seeded::SeededSource;
