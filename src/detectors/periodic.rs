//! Detection of modular defection schedules (calibration probes).
//!
//! A calibration probe defects on a hidden periodic schedule early in the
//! match to manipulate an adaptive opponent's classification. Defections
//! concentrating on one residue class mod k are the telltale; outside the
//! opening calibration window the same signal is treated as ordinary play.

use crate::{config::EngineConfig, history::OutcomeHistory};

/// A detected modular defection schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicState {
    /// Schedule period k.
    pub period: usize,
    /// Residue class (0..k-1) of 1-based round numbers where defections
    /// concentrate.
    pub residue: usize,
    /// Concentration margin: winning-bucket defect fraction minus the mean
    /// of the remaining buckets. Clamped to [0, 1].
    pub confidence: f64,
}

impl PeriodicState {
    /// Whether the opponent is predicted to defect on the given round.
    pub fn predicts_defection(&self, round: usize) -> bool {
        round % self.period == self.residue
    }
}

/// Searches candidate periods, bucketing observed opponent moves by round
/// residue and scoring how concentrated the defections are.
#[derive(Debug, Clone)]
pub struct PeriodicCalibratorDetector {
    min_period: usize,
    max_period: usize,
    significance: f64,
    min_bucket_samples: usize,
    calibration_window: usize,
    decay: f64,
    drop_floor: f64,
    state: Option<PeriodicState>,
}

impl PeriodicCalibratorDetector {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            min_period: config.periodic_min_period,
            max_period: config.periodic_max_period,
            significance: config.periodic_significance,
            min_bucket_samples: config.periodic_min_bucket_samples,
            calibration_window: config.calibration_window,
            decay: config.pattern_decay,
            drop_floor: config.pattern_drop_floor,
            state: None,
        }
    }

    /// Re-evaluate after a new round has been recorded.
    pub fn evaluate(&mut self, history: &OutcomeHistory) {
        if history.len() > self.calibration_window {
            // The probe window has passed; the hypothesis only fades.
            self.apply_decay();
            return;
        }

        let mut best: Option<PeriodicState> = None;
        for period in self.min_period..=self.max_period {
            if let Some(candidate) = self.score_period(history, period)
                && best.is_none_or(|b| candidate.confidence > b.confidence)
            {
                best = Some(candidate);
            }
        }

        match best {
            Some(state) if state.confidence > self.significance => self.state = Some(state),
            _ => self.apply_decay(),
        }
    }

    fn score_period(&self, history: &OutcomeHistory, period: usize) -> Option<PeriodicState> {
        let mut defects = vec![0usize; period];
        let mut totals = vec![0usize; period];
        let first_round = history.first_retained_round();
        for (offset, bit) in history.opponent_bits().enumerate() {
            let residue = (first_round + offset) % period;
            totals[residue] += 1;
            if bit == 1 {
                defects[residue] += 1;
            }
        }

        let fractions: Vec<f64> = (0..period)
            .map(|r| {
                if totals[r] == 0 {
                    0.0
                } else {
                    defects[r] as f64 / totals[r] as f64
                }
            })
            .collect();
        let residue = (0..period).max_by(|&a, &b| fractions[a].total_cmp(&fractions[b]))?;

        let required = self
            .min_bucket_samples
            .max(history.len() / (2 * period));
        if totals[residue] < required {
            return None;
        }

        let signal = fractions[residue];
        let noise = (fractions.iter().sum::<f64>() - signal) / (period - 1) as f64;
        Some(PeriodicState {
            period,
            residue,
            confidence: (signal - noise).clamp(0.0, 1.0),
        })
    }

    fn apply_decay(&mut self) {
        if let Some(state) = &mut self.state {
            state.confidence *= self.decay;
            if state.confidence < self.drop_floor {
                self.state = None;
            }
        }
    }

    pub fn confidence(&self) -> f64 {
        self.state.map_or(0.0, |s| s.confidence)
    }

    pub fn state(&self) -> Option<PeriodicState> {
        self.state
    }

    /// Active only while the match is still inside the calibration window;
    /// the policy neutralizes the schedule only then.
    pub fn active(&self, round: usize) -> bool {
        self.state.is_some() && round <= self.calibration_window
    }
}
