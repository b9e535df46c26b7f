//! Observer port - match observation and data collection.

use crate::{
    Result,
    pipeline::{MatchReport, RoundRecord},
};

/// Observer trait for monitoring a running match.
///
/// Observers compose: progress bars, metrics accumulation and trace
/// recording all hang off the same hooks without the runner knowing any
/// output format.
///
/// # Event Sequence
///
/// 1. `on_match_start(total_rounds)` - once before round 1
/// 2. `on_round(record)` - once per completed round
/// 3. `on_match_end(report)` - once after the final round
pub trait MatchObserver: Send {
    /// Called before the first round.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_match_start(&mut self, _total_rounds: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each completed round with the full round record.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to observe per-round data.
    fn on_round(&mut self, _record: &RoundRecord) -> Result<()> {
        Ok(())
    }

    /// Called once after the final round with the finished report.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to finalize outputs or display summaries.
    fn on_match_end(&mut self, _report: &MatchReport) -> Result<()> {
        Ok(())
    }
}
