//! Short repeating-cycle detection via autocorrelation.

use crate::{config::EngineConfig, history::OutcomeHistory, types::Move};

/// A locked-in repeating opponent cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternState {
    /// The repeating move sequence, oldest first.
    pub cycle: Vec<Move>,
    /// Match fraction at detection time, decayed while unconfirmed.
    pub confidence: f64,
    /// 1-based round number the first cycle element was observed on.
    anchor_round: usize,
}

impl PatternState {
    /// Forecast the opponent's move for the given 1-based round number.
    /// Rounds before the anchor saturate to the first cycle element.
    pub fn forecast(&self, round: usize) -> Move {
        let index = round.saturating_sub(self.anchor_round) % self.cycle.len();
        self.cycle[index]
    }
}

/// Compares the most recent L opponent moves against the L moves before
/// them, for L from the configured minimum up to the maximum. The smallest
/// qualifying L wins, so the simplest cycle explanation is preferred.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    min_period: usize,
    max_period: usize,
    match_threshold: f64,
    trust_floor: f64,
    decay: f64,
    drop_floor: f64,
    state: Option<PatternState>,
}

impl PatternDetector {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            min_period: config.pattern_min_period,
            max_period: config.pattern_max_period,
            match_threshold: config.pattern_match_threshold,
            trust_floor: config.pattern_trust_floor,
            decay: config.pattern_decay,
            drop_floor: config.pattern_drop_floor,
            state: None,
        }
    }

    /// Re-evaluate after a new round has been recorded.
    pub fn evaluate(&mut self, history: &OutcomeHistory) {
        let window: Vec<u8> = {
            let needed = 2 * self.max_period;
            let available = history.retained();
            history
                .opponent_bits()
                .skip(available.saturating_sub(needed))
                .collect()
        };

        for period in self.min_period..=self.max_period {
            if window.len() < 2 * period {
                break;
            }
            let recent = &window[window.len() - period..];
            let previous = &window[window.len() - 2 * period..window.len() - period];
            // A uniform window carries no cyclic information; constant
            // opponents belong to the rate-based tags.
            if recent.iter().all(|&bit| bit == recent[0]) {
                continue;
            }
            let matches = recent
                .iter()
                .zip(previous)
                .filter(|(a, b)| a == b)
                .count();
            let fraction = matches as f64 / period as f64;
            if fraction >= self.match_threshold {
                let anchor_round = history.len() - period + 1;
                self.state = Some(PatternState {
                    cycle: recent.iter().map(|&bit| Move::from_bit(bit)).collect(),
                    confidence: fraction.clamp(0.0, 1.0),
                    anchor_round,
                });
                return;
            }
        }

        // No period re-confirmed this round.
        if let Some(state) = &mut self.state {
            state.confidence *= self.decay;
            if state.confidence < self.drop_floor {
                self.state = None;
            }
        }
    }

    pub fn confidence(&self) -> f64 {
        self.state.as_ref().map_or(0.0, |s| s.confidence)
    }

    pub fn state(&self) -> Option<&PatternState> {
        self.state.as_ref()
    }

    /// Forecast the opponent's move for `round`, or None while the stored
    /// cycle is absent or below the trust floor.
    pub fn predict(&self, round: usize) -> Option<Move> {
        let state = self.state.as_ref()?;
        if state.confidence < self.trust_floor {
            return None;
        }
        Some(state.forecast(round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move::*;

    fn history_of(opponent: &[Move]) -> OutcomeHistory {
        let mut history = OutcomeHistory::new(2000);
        for &mv in opponent {
            history.record(Cooperate, mv);
        }
        history
    }

    fn cycle_moves(cycle: &[Move], rounds: usize) -> Vec<Move> {
        (0..rounds).map(|i| cycle[i % cycle.len()]).collect()
    }

    #[test]
    fn test_detects_three_cycle() {
        let cycle = [Cooperate, Cooperate, Defect];
        let history = history_of(&cycle_moves(&cycle, 12));
        let mut detector = PatternDetector::new(&EngineConfig::default());
        detector.evaluate(&history);
        let state = detector.state().expect("cycle should be detected");
        assert_eq!(state.cycle.len(), 3);
        assert_eq!(state.confidence, 1.0);
    }

    #[test]
    fn test_prediction_tracks_cycle_phase() {
        let cycle = [Cooperate, Cooperate, Defect];
        let config = EngineConfig::default();
        let mut detector = PatternDetector::new(&config);
        let mut history = OutcomeHistory::new(2000);

        let mut correct = 0;
        let mut predicted = 0;
        for round in 1..=40 {
            let actual = cycle[(round - 1) % cycle.len()];
            if let Some(forecast) = detector.predict(round) {
                predicted += 1;
                if forecast == actual {
                    correct += 1;
                }
            }
            history.record(Cooperate, actual);
            detector.evaluate(&history);
        }
        assert!(predicted >= 20, "detector should lock on early");
        assert_eq!(correct, predicted, "phase-anchored forecasts never miss");
    }

    #[test]
    fn test_prefers_shortest_period() {
        // An alternator also matches at periods 4 and 6; period 2 must win.
        let history = history_of(&cycle_moves(&[Cooperate, Defect], 16));
        let mut detector = PatternDetector::new(&EngineConfig::default());
        detector.evaluate(&history);
        assert_eq!(detector.state().unwrap().cycle.len(), 2);
    }

    #[test]
    fn test_confidence_decays_and_drops() {
        let config = EngineConfig::default();
        let mut detector = PatternDetector::new(&config);
        let mut history = OutcomeHistory::new(2000);
        for &mv in &cycle_moves(&[Cooperate, Defect], 12) {
            history.record(Cooperate, mv);
        }
        detector.evaluate(&history);
        assert!(detector.confidence() > 0.8);

        // Constant play carries no cycle; the stale alternation decays away
        // and eventually drops below the floor.
        for _ in 0..40 {
            history.record(Cooperate, Cooperate);
            detector.evaluate(&history);
        }
        assert!(detector.state().is_none(), "stale cycle should drop");
    }

    #[test]
    fn test_noise_never_holds_confidence() {
        let config = EngineConfig::default();
        let mut detector = PatternDetector::new(&config);
        let mut history = OutcomeHistory::new(2000);
        let noise = [
            Cooperate, Defect, Defect, Cooperate, Defect, Cooperate, Cooperate, Defect, Defect,
            Defect, Cooperate, Cooperate, Defect, Cooperate, Defect, Defect,
        ];
        for &mv in &noise {
            history.record(Cooperate, mv);
            detector.evaluate(&history);
        }
        assert!(
            detector.confidence() < 0.6,
            "noise should not hold a confident pattern"
        );
    }

    #[test]
    fn test_untrusted_below_floor() {
        let mut detector = PatternDetector::new(&EngineConfig::default());
        let history = history_of(&cycle_moves(&[Cooperate, Defect], 12));
        detector.evaluate(&history);
        if let Some(state) = detector.state_mut_for_tests() {
            state.confidence = 0.3;
        }
        assert_eq!(detector.predict(13), None);
    }
}

#[cfg(test)]
impl PatternDetector {
    fn state_mut_for_tests(&mut self) -> Option<&mut PatternState> {
        self.state.as_mut()
    }
}
