//! Behavioral classification of the opponent.
//!
//! The classifier folds history statistics and detector confidences into a
//! single [`ClassificationTag`]. It re-evaluates on a fixed interval rather
//! than every round so single-round noise cannot flap the tag; between
//! evaluations the previous tag persists.

use crate::{
    config::EngineConfig,
    detectors::{PatternDetector, PeriodicCalibratorDetector},
    history::OutcomeHistory,
    types::ClassificationTag,
};

/// Interval-cached tag evaluation.
///
/// The predicates are checked in a fixed order and the first match wins.
/// The order matters because the categories overlap: calibration probing
/// and the pure extremes are the cheapest, most confident calls and are
/// checked before the subtler relational archetypes.
#[derive(Debug, Clone)]
pub struct BehaviorClassifier {
    current: ClassificationTag,
    last_evaluated: Option<usize>,
}

impl BehaviorClassifier {
    pub fn new() -> Self {
        Self {
            current: ClassificationTag::Unknown,
            last_evaluated: None,
        }
    }

    /// The tag as of the last evaluation.
    pub fn current(&self) -> ClassificationTag {
        self.current
    }

    /// Return the tag for the given round, re-evaluating if the interval
    /// has elapsed since the last evaluation.
    pub fn classify(
        &mut self,
        config: &EngineConfig,
        history: &OutcomeHistory,
        pattern: &PatternDetector,
        periodic: &PeriodicCalibratorDetector,
        round: usize,
    ) -> ClassificationTag {
        if history.len() < config.classify_floor {
            self.current = ClassificationTag::Unknown;
            self.last_evaluated = None;
            return self.current;
        }

        let due = match self.last_evaluated {
            None => true,
            Some(last) => round.saturating_sub(last) >= config.classify_interval,
        };
        if due {
            self.current = Self::evaluate(config, history, pattern, periodic, round);
            self.last_evaluated = Some(round);
        }
        self.current
    }

    fn evaluate(
        config: &EngineConfig,
        history: &OutcomeHistory,
        pattern: &PatternDetector,
        periodic: &PeriodicCalibratorDetector,
        round: usize,
    ) -> ClassificationTag {
        let counts = history.counts();
        let rate_long = history.coop_rate(config.long_window);
        let stability = history.stability(config.long_window);
        let change_rate = history.change_rate(config.long_window);
        let pattern_confidence = pattern.confidence();

        if let Some(state) = periodic.state()
            && periodic.active(round)
            && state.period >= config.periodic_tag_min_period
            && state.confidence > config.periodic_significance
        {
            return ClassificationTag::PeriodicCalibrator;
        }

        if rate_long > config.cooperator_rate
            && stability > config.cooperator_stability
            && counts.total() >= config.min_classify_rounds
            && counts.betrayal_ratio() < config.betrayal_ceiling
        {
            return ClassificationTag::Cooperator;
        }

        if rate_long < config.defector_rate {
            return ClassificationTag::Defector;
        }

        // A perfectly periodic opponent is balanced and high-churn too;
        // only structureless play counts as noise.
        if (rate_long - 0.5).abs() < config.noisy_bias
            && change_rate > config.noisy_change_rate
            && pattern_confidence < config.pattern_tag_threshold
        {
            return ClassificationTag::Noisy;
        }

        if pattern_confidence > config.pattern_tag_threshold {
            return ClassificationTag::Pattern;
        }

        if history.mirror_ratio() > config.mirror_threshold {
            return if history.recovery_after_mutual_defection() > config.forgiving_recovery {
                ClassificationTag::Forgiving
            } else {
                ClassificationTag::Reactive
            };
        }

        ClassificationTag::Adaptive
    }
}

impl Default for BehaviorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
