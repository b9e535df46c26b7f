//! Online logistic prediction of the opponent's next move.

use crate::{config::EngineConfig, history::OutcomeHistory, types::Move};

/// Number of features the predictor consumes.
pub const FEATURE_COUNT: usize = 10;

/// Window for the "recent move" rate features.
const RECENT_WINDOW: usize = 5;

/// Per-opponent online logistic regression over recent-history features.
///
/// Each round the model forecasts P(opponent cooperates next round); once
/// the actual move arrives the stored feature vector is scored against it
/// and the weights take one decayed gradient step. Weights are never reset
/// mid-match; the multiplicative decay bounds their growth and gradually
/// forgets behavior the opponent has abandoned.
#[derive(Debug, Clone)]
pub struct OnlinePredictor {
    weights: [f64; FEATURE_COUNT],
    bias: f64,
    learning_rate: f64,
    rate_decay: f64,
    weight_decay: f64,
    randomness_window: usize,
    randomness_min_samples: usize,
    pending: Option<[f64; FEATURE_COUNT]>,
}

impl OnlinePredictor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: [0.0; FEATURE_COUNT],
            bias: 0.0,
            learning_rate: config.learning_rate,
            rate_decay: config.learning_rate_decay,
            weight_decay: config.weight_decay,
            randomness_window: config.randomness_window,
            randomness_min_samples: config.randomness_min_samples,
            pending: None,
        }
    }

    /// Forecast P(opponent cooperates next round) and remember the feature
    /// vector so [`observe`](Self::observe) can score it later. Returns the
    /// neutral 0.5 while the history is empty.
    pub fn forecast(&mut self, history: &OutcomeHistory) -> f64 {
        match self.features(history) {
            Some(features) => {
                let p = self.predict(&features);
                self.pending = Some(features);
                p
            }
            None => {
                self.pending = None;
                0.5
            }
        }
    }

    /// Score the pending forecast against the observed move and apply one
    /// gradient step. `round` is the 1-based round index driving the
    /// learning-rate decay.
    pub fn observe(&mut self, actual: Move, round: usize) {
        let Some(features) = self.pending.take() else {
            return;
        };
        let target = if actual.is_cooperate() { 1.0 } else { 0.0 };
        let error = target - self.predict(&features);
        let eta = self.learning_rate / (1.0 + self.rate_decay * round.max(1) as f64).sqrt();
        for (weight, feature) in self.weights.iter_mut().zip(features) {
            *weight = *weight * self.weight_decay + eta * error * feature;
        }
        self.bias = self.bias * self.weight_decay + eta * error;
    }

    /// Drop a stored feature vector whose outcome will never arrive
    /// (malformed round).
    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut activation = self.bias;
        for (weight, feature) in self.weights.iter().zip(features) {
            activation += weight * feature;
        }
        sigmoid(activation)
    }

    fn features(&self, history: &OutcomeHistory) -> Option<[f64; FEATURE_COUNT]> {
        if history.is_empty() {
            return None;
        }
        let last_opp = move_feature(history.opponent_move_back(0));
        let last_own = move_feature(history.own_move_back(0));
        let prev_opp = history
            .opponent_move_back(1)
            .map_or(last_opp, |m| move_feature(Some(m)));
        let prev_own = history
            .own_move_back(1)
            .map_or(last_own, |m| move_feature(Some(m)));
        let counts = history.counts();
        Some([
            last_opp,
            last_own,
            prev_opp,
            prev_own,
            history.coop_rate(RECENT_WINDOW),
            history.own_coop_rate(RECENT_WINDOW),
            history.coop_rate(history.len()),
            counts.coop_given_coop(),
            counts.coop_given_defect(),
            history.randomness_signal(self.randomness_window, self.randomness_min_samples),
        ])
    }
}

fn move_feature(mv: Option<Move>) -> f64 {
    match mv {
        Some(Move::Cooperate) => 1.0,
        Some(Move::Defect) => 0.0,
        None => 0.5,
    }
}

/// Logistic function with the activation clamped before exponentiation.
fn sigmoid(activation: f64) -> f64 {
    let clamped = activation.clamp(-20.0, 20.0);
    1.0 / (1.0 + (-clamped).exp())
}
