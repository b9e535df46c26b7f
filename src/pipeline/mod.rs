//! Match execution pipeline.
//!
//! This module runs one engine against one opponent:
//! - Driving both parties through the begin/respond protocol
//! - Scoring rounds with the standard payoff matrix
//! - Notifying composable observers
//! - Producing a serializable match report

pub mod match_runner;
pub mod observers;
pub mod opponents;

pub use match_runner::{MatchConfig, MatchReport, MatchRunner, RoundRecord};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver, TraceRecorder};
pub use opponents::{
    AlwaysCooperate, AlwaysDefect, Alternator, CalibrationProbe, CycleReplayer,
    GenerousTitForTat, GrimTrigger, RandomPlayer, TitForTat,
};

pub use crate::ports::{MatchObserver, OpponentStrategy};
