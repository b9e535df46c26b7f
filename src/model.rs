//! The per-match opponent model aggregate.

use crate::{
    classifier::BehaviorClassifier,
    config::EngineConfig,
    detectors::{OnlinePredictor, PatternDetector, PeriodicCalibratorDetector},
    history::OutcomeHistory,
    types::{ClassificationTag, RoundOutcome},
};

/// Everything the engine knows about the current opponent.
///
/// One aggregate per engine instance, created at match start and discarded
/// at match end. Holding all mutable opponent state in one owned value
/// keeps concurrent matches trivially independent: separate aggregates,
/// nothing shared.
#[derive(Debug, Clone)]
pub struct OpponentModel {
    history: OutcomeHistory,
    pattern: PatternDetector,
    periodic: PeriodicCalibratorDetector,
    predictor: OnlinePredictor,
    classifier: BehaviorClassifier,
}

impl OpponentModel {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            history: OutcomeHistory::new(config.memory_limit),
            pattern: PatternDetector::new(config),
            periodic: PeriodicCalibratorDetector::new(config),
            predictor: OnlinePredictor::new(config),
            classifier: BehaviorClassifier::new(),
        }
    }

    /// Fold one completed round into every sub-model. `round` is the
    /// 1-based index of the observed round.
    pub fn observe(&mut self, outcome: RoundOutcome, round: usize) {
        self.predictor.observe(outcome.opponent, round);
        self.history.record(outcome.own, outcome.opponent);
        self.pattern.evaluate(&self.history);
        self.periodic.evaluate(&self.history);
    }

    /// A round whose moves could not be interpreted: no counters move, and
    /// any pending predictor features are discarded since there is no
    /// outcome to score them against.
    pub fn skip_round(&mut self) {
        self.predictor.discard_pending();
    }

    /// Forecast P(opponent cooperates next round).
    pub fn forecast_cooperation(&mut self) -> f64 {
        self.predictor.forecast(&self.history)
    }

    /// Current behavioral tag, re-evaluated on the classifier's interval.
    pub fn classify(&mut self, config: &EngineConfig, round: usize) -> ClassificationTag {
        self.classifier.classify(
            config,
            &self.history,
            &self.pattern,
            &self.periodic,
            round,
        )
    }

    /// The tag as of the last classifier evaluation.
    pub fn current_tag(&self) -> ClassificationTag {
        self.classifier.current()
    }

    pub fn history(&self) -> &OutcomeHistory {
        &self.history
    }

    pub fn pattern(&self) -> &PatternDetector {
        &self.pattern
    }

    pub fn periodic(&self) -> &PeriodicCalibratorDetector {
        &self.periodic
    }
}
