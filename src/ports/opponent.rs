//! Opponent port - the other party in a match.

use crate::types::{Move, RoundOutcome};

/// Unified interface for the opposing party in a match.
///
/// The match runner drives both the engine and an `OpponentStrategy`
/// through the same begin/respond protocol the engine itself follows.
/// Implementations range from fixed baselines (always-cooperate, grim
/// trigger) to the synthetic probes the detector tests rely on.
///
/// History is supplied from the opponent's own perspective: `own` is the
/// opponent's move, `opponent` is the engine's.
pub trait OpponentStrategy: Send {
    /// First move of a fresh match, before any history exists. Resets any
    /// internal state.
    fn begin(&mut self) -> Move;

    /// Move for the next round given all completed rounds so far.
    fn respond(&mut self, history: &[RoundOutcome]) -> Move;

    /// Name used in reports and logs.
    fn name(&self) -> &str;

    /// Seed the strategy's internal randomness, if it has any.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for deterministic strategies.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
