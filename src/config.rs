//! Engine configuration: every tuning threshold, named and documented once.
//!
//! The values are contracts in semantics, not in magnitude: retuning a
//! threshold does not change the architecture, and each field documents the
//! behavior it governs so retuning stays safe.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Complete tuning surface of the decision engine.
///
/// `Default` carries the tournament-tuned values. Builder-style `with_*`
/// methods cover the fields tests and experiments most often override.
///
/// # Examples
///
/// ```
/// use dilemma::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_expected_rounds(1_000)
///     .with_trust_build(6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rounds at the start of a match played COOPERATE unconditionally.
    pub trust_build: usize,
    /// Minimum completed rounds before the classifier leaves UNKNOWN.
    pub classify_floor: usize,
    /// Rounds between classifier re-evaluations; the previous tag persists
    /// in between so single-round noise cannot flap the tag.
    pub classify_interval: usize,
    /// Window for the long-run opponent cooperation rate.
    pub long_window: usize,
    /// Window for the recent opponent cooperation/defection rate.
    pub short_window: usize,
    /// Cap on the retained move windows; oldest entries evict first.
    pub memory_limit: usize,

    /// Long-window cooperation rate above which COOPERATOR is considered.
    pub cooperator_rate: f64,
    /// Minimum move-to-move stability for COOPERATOR.
    pub cooperator_stability: f64,
    /// Maximum fraction of rounds where our cooperation met a defection
    /// for the opponent to still count as a cooperator.
    pub betrayal_ceiling: f64,
    /// Minimum completed rounds before COOPERATOR/DEFECTOR can be assigned.
    pub min_classify_rounds: usize,
    /// Long-window cooperation rate below which DEFECTOR is assigned.
    pub defector_rate: f64,
    /// Maximum |cooperation rate − 0.5| for NOISY.
    pub noisy_bias: f64,
    /// Minimum move-to-move change rate for NOISY.
    pub noisy_change_rate: f64,
    /// Mirror ratio above which play reads as reactive (tit-for-tat-like).
    pub mirror_threshold: f64,
    /// Recovery-from-mutual-defection probability splitting FORGIVING
    /// from REACTIVE.
    pub forgiving_recovery: f64,

    /// Shortest repeating cycle length searched by the pattern detector.
    pub pattern_min_period: usize,
    /// Longest repeating cycle length searched by the pattern detector.
    pub pattern_max_period: usize,
    /// Autocorrelation match fraction that locks in a candidate cycle.
    pub pattern_match_threshold: f64,
    /// Confidence below which pattern predictions are not acted on.
    pub pattern_trust_floor: f64,
    /// Multiplicative confidence decay applied when no cycle re-confirms.
    pub pattern_decay: f64,
    /// Confidence below which the stored cycle is dropped entirely.
    pub pattern_drop_floor: f64,
    /// Pattern confidence required for the PATTERN tag.
    pub pattern_tag_threshold: f64,

    /// Smallest modular period searched by the calibrator detector.
    pub periodic_min_period: usize,
    /// Largest modular period searched by the calibrator detector.
    pub periodic_max_period: usize,
    /// Required (signal − noise) concentration margin.
    pub periodic_significance: f64,
    /// Minimum observations in the winning residue bucket.
    pub periodic_min_bucket_samples: usize,
    /// Rounds from match start within which calibration probing is credible.
    pub calibration_window: usize,
    /// Smallest detected period the classifier will tag as a calibrator.
    /// A period-2 schedule is indistinguishable from plain alternation and
    /// is left to the pattern machinery.
    pub periodic_tag_min_period: usize,

    /// Initial learning rate of the online logistic predictor.
    pub learning_rate: f64,
    /// Round-count coefficient in the learning-rate decay
    /// `η₀ / sqrt(1 + c·round)`.
    pub learning_rate_decay: f64,
    /// Multiplicative weight shrink per update; forgets stale behavior.
    pub weight_decay: f64,
    /// Trailing opponent moves inspected by the randomness indicator.
    pub randomness_window: usize,
    /// Samples below which the indicator reports 1.0 (not callable).
    pub randomness_min_samples: usize,

    /// Lifetime exploit cap as a fraction of expected remaining rounds.
    pub max_exploit_fraction: f64,
    /// Per-round exploit probability floor against a fresh cooperator.
    pub base_exploit_rate: f64,
    /// Per-round exploit probability ceiling.
    pub max_exploit_rate: f64,
    /// Exploit rate growth per round of unbroken opponent cooperation.
    pub exploit_streak_bonus: f64,
    /// Cooperation streak length before the bonus starts accruing.
    pub exploit_streak_floor: usize,

    /// Probability of forgiving instead of mirroring a defection (REACTIVE).
    pub forgive_prob: f64,
    /// Forgiveness probability against FORGIVING opponents.
    pub forgiving_forgive_prob: f64,
    /// Recent defect rate above which the NOISY handler retaliates.
    pub noisy_defect_threshold: f64,
    /// Expected-value gap treated as a near-tie by the ADAPTIVE handler.
    pub ev_margin: f64,
    /// Cooperation probability on an ADAPTIVE near-tie.
    pub ev_tie_coop_prob: f64,
    /// Predicted cooperation probability below which a near-tie resolves
    /// to defection outright.
    pub ev_tie_defect_cutoff: f64,
    /// Probability of taking a predicted-cooperation exploit (PATTERN).
    pub pattern_exploit_rate: f64,
    /// Uniform final-move flip probability through MID/LATE phases.
    pub perturbation_rate: f64,

    /// Advertised match length; drives budget and phase boundaries.
    pub expected_rounds: usize,
    /// Rounds before the end at which the LATE phase begins.
    pub endgame_window: usize,
    /// Final rounds played DEFECT unconditionally.
    pub final_defect_rounds: usize,
    /// Defection probability at the start of the endgame ramp.
    pub late_defect_base: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trust_build: 10,
            classify_floor: 6,
            classify_interval: 8,
            long_window: 120,
            short_window: 50,
            memory_limit: 2000,

            cooperator_rate: 0.92,
            cooperator_stability: 0.8,
            betrayal_ceiling: 0.08,
            min_classify_rounds: 12,
            defector_rate: 0.08,
            noisy_bias: 0.1,
            noisy_change_rate: 0.4,
            mirror_threshold: 0.75,
            forgiving_recovery: 0.4,

            pattern_min_period: 2,
            pattern_max_period: 7,
            pattern_match_threshold: 0.88,
            pattern_trust_floor: 0.5,
            pattern_decay: 0.85,
            pattern_drop_floor: 0.05,
            pattern_tag_threshold: 0.6,

            periodic_min_period: 2,
            periodic_max_period: 8,
            periodic_significance: 0.45,
            periodic_min_bucket_samples: 6,
            calibration_window: 40,
            periodic_tag_min_period: 3,

            learning_rate: 0.2,
            learning_rate_decay: 0.0005,
            weight_decay: 0.9995,
            randomness_window: 60,
            randomness_min_samples: 30,

            max_exploit_fraction: 0.02,
            base_exploit_rate: 0.002,
            max_exploit_rate: 0.06,
            exploit_streak_bonus: 0.02,
            exploit_streak_floor: 3,

            forgive_prob: 0.02,
            forgiving_forgive_prob: 0.2,
            noisy_defect_threshold: 0.45,
            ev_margin: 0.06,
            ev_tie_coop_prob: 0.92,
            ev_tie_defect_cutoff: 0.45,
            pattern_exploit_rate: 0.9,
            perturbation_rate: 0.01,

            expected_rounds: 10_000,
            endgame_window: 100,
            final_defect_rounds: 2,
            late_defect_base: 0.5,
        }
    }
}

impl EngineConfig {
    /// Set the advertised match length.
    pub fn with_expected_rounds(mut self, rounds: usize) -> Self {
        self.expected_rounds = rounds;
        self
    }

    /// Set the unconditional-cooperation opening length.
    pub fn with_trust_build(mut self, rounds: usize) -> Self {
        self.trust_build = rounds;
        self
    }

    /// Set the anti-meta-learning flip probability.
    pub fn with_perturbation_rate(mut self, rate: f64) -> Self {
        self.perturbation_rate = rate;
        self
    }

    /// Check that every probability-valued field is a probability and the
    /// structural fields are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for the first probability field outside
    /// [0, 1], or [`Error::InvalidConfiguration`] for inconsistent windows.
    pub fn validate(&self) -> Result<()> {
        let unit_fields: [(&'static str, f64); 26] = [
            ("cooperator_rate", self.cooperator_rate),
            ("cooperator_stability", self.cooperator_stability),
            ("betrayal_ceiling", self.betrayal_ceiling),
            ("defector_rate", self.defector_rate),
            ("noisy_bias", self.noisy_bias),
            ("noisy_change_rate", self.noisy_change_rate),
            ("mirror_threshold", self.mirror_threshold),
            ("forgiving_recovery", self.forgiving_recovery),
            ("pattern_match_threshold", self.pattern_match_threshold),
            ("pattern_trust_floor", self.pattern_trust_floor),
            ("pattern_decay", self.pattern_decay),
            ("pattern_drop_floor", self.pattern_drop_floor),
            ("pattern_tag_threshold", self.pattern_tag_threshold),
            ("periodic_significance", self.periodic_significance),
            ("weight_decay", self.weight_decay),
            ("max_exploit_fraction", self.max_exploit_fraction),
            ("base_exploit_rate", self.base_exploit_rate),
            ("max_exploit_rate", self.max_exploit_rate),
            ("forgive_prob", self.forgive_prob),
            ("forgiving_forgive_prob", self.forgiving_forgive_prob),
            ("noisy_defect_threshold", self.noisy_defect_threshold),
            ("pattern_exploit_rate", self.pattern_exploit_rate),
            ("perturbation_rate", self.perturbation_rate),
            ("ev_tie_coop_prob", self.ev_tie_coop_prob),
            ("ev_tie_defect_cutoff", self.ev_tie_defect_cutoff),
            ("late_defect_base", self.late_defect_base),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(Error::OutOfRange {
                    field,
                    low: 0.0,
                    high: 1.0,
                    value,
                });
            }
        }

        if self.pattern_min_period < 2 || self.pattern_min_period > self.pattern_max_period {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "pattern period range [{}, {}] is not a valid range starting at 2",
                    self.pattern_min_period, self.pattern_max_period
                ),
            });
        }
        if self.periodic_min_period < 2 || self.periodic_min_period > self.periodic_max_period {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "periodic period range [{}, {}] is not a valid range starting at 2",
                    self.periodic_min_period, self.periodic_max_period
                ),
            });
        }
        if self.expected_rounds == 0 {
            return Err(Error::InvalidConfiguration {
                message: "expected_rounds must be positive".to_string(),
            });
        }
        if self.endgame_window + self.trust_build > self.expected_rounds {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "trust_build ({}) plus endgame_window ({}) exceed expected_rounds ({})",
                    self.trust_build, self.endgame_window, self.expected_rounds
                ),
            });
        }
        Ok(())
    }

    /// First round index (1-based) of the LATE phase.
    pub fn endgame_start(&self) -> usize {
        self.expected_rounds.saturating_sub(self.endgame_window)
    }
}
