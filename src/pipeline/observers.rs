//! Observer adapters for the match pipeline.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::match_runner::{MatchReport, RoundRecord},
    ports::MatchObserver,
};

/// Progress bar observer - shows match progress and running scores.
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    engine_score: u64,
    opponent_score: u64,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            engine_score: 0,
            opponent_score: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchObserver for ProgressObserver {
    fn on_match_start(&mut self, total_rounds: usize) -> Result<()> {
        let pb = ProgressBar::new(total_rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.engine_score += u64::from(record.engine_points);
        self.opponent_score += u64::from(record.opponent_points);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.round as u64);
            pb.set_message(format!("{} : {}", self.engine_score, self.opponent_score));
        }
        Ok(())
    }

    fn on_match_end(&mut self, report: &MatchReport) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "{} : {}",
                report.engine_score, report.opponent_score
            ));
        }
        Ok(())
    }
}

/// Metrics observer - accumulates move counts and scores in memory.
pub struct MetricsObserver {
    rounds: usize,
    engine_cooperations: usize,
    opponent_cooperations: usize,
    engine_score: u64,
    opponent_score: u64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            rounds: 0,
            engine_cooperations: 0,
            opponent_cooperations: 0,
            engine_score: 0,
            opponent_score: 0,
        }
    }

    pub fn engine_coop_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.engine_cooperations as f64 / self.rounds as f64
        }
    }

    pub fn opponent_coop_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.opponent_cooperations as f64 / self.rounds as f64
        }
    }

    /// Average engine points per round.
    pub fn points_per_round(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.engine_score as f64 / self.rounds as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            rounds: self.rounds,
            engine_score: self.engine_score,
            opponent_score: self.opponent_score,
            engine_coop_rate: self.engine_coop_rate(),
            opponent_coop_rate: self.opponent_coop_rate(),
            points_per_round: self.points_per_round(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchObserver for MetricsObserver {
    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.rounds += 1;
        if record.engine_move.is_cooperate() {
            self.engine_cooperations += 1;
        }
        if record.opponent_move.is_cooperate() {
            self.opponent_cooperations += 1;
        }
        self.engine_score += u64::from(record.engine_points);
        self.opponent_score += u64::from(record.opponent_points);
        Ok(())
    }
}

/// Summary of accumulated match metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub rounds: usize,
    pub engine_score: u64,
    pub opponent_score: u64,
    pub engine_coop_rate: f64,
    pub opponent_coop_rate: f64,
    pub points_per_round: f64,
}

/// Trace recorder - collects every round record into a shared buffer the
/// caller keeps a handle to, since the runner consumes the observer box.
pub struct TraceRecorder {
    sink: Arc<Mutex<Vec<RoundRecord>>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self {
            sink: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded rounds.
    pub fn sink(&self) -> Arc<Mutex<Vec<RoundRecord>>> {
        Arc::clone(&self.sink)
    }
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchObserver for TraceRecorder {
    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        let mut sink = self.sink.lock().map_err(|_| crate::Error::InvalidConfiguration {
            message: "trace recorder sink poisoned".to_string(),
        })?;
        sink.push(*record);
        Ok(())
    }
}
