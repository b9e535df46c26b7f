//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are the seams between the decision engine and everything
//! outside it: the entropy supply, the opposing party, and match
//! observation. The domain owns the traits; adapters implement them.

pub mod observer;
pub mod opponent;
pub mod random;

pub use observer::MatchObserver;
pub use opponent::OpponentStrategy;
pub use random::RandomSource;
