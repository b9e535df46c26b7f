//! Statistical analysis of recorded match traces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, DiscreteCDF};

use crate::pipeline::match_runner::RoundRecord;

/// Summary statistics computed from a full round trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStats {
    pub rounds: usize,
    pub engine_coop_rate: f64,
    pub opponent_coop_rate: f64,
    /// Average engine points per round.
    pub points_per_round: f64,
    pub longest_opponent_defection_streak: usize,
    /// Rounds spent under each behavioral tag.
    pub tag_residence: HashMap<String, usize>,
    /// Two-sided p-value of the opponent's move balance against a fair
    /// coin. Small values mean the opponent is measurably biased.
    pub opponent_bias_p_value: f64,
}

impl TraceStats {
    pub fn from_records(records: &[RoundRecord]) -> Self {
        let rounds = records.len();
        let mut engine_cooperations = 0usize;
        let mut opponent_cooperations = 0usize;
        let mut engine_score = 0u64;
        let mut tag_residence: HashMap<String, usize> = HashMap::new();
        let mut longest_streak = 0usize;
        let mut current_streak = 0usize;

        for record in records {
            if record.engine_move.is_cooperate() {
                engine_cooperations += 1;
            }
            if record.opponent_move.is_cooperate() {
                opponent_cooperations += 1;
                current_streak = 0;
            } else {
                current_streak += 1;
                longest_streak = longest_streak.max(current_streak);
            }
            engine_score += u64::from(record.engine_points);
            *tag_residence.entry(record.tag.to_string()).or_insert(0) += 1;
        }

        let denom = rounds.max(1) as f64;
        Self {
            rounds,
            engine_coop_rate: engine_cooperations as f64 / denom,
            opponent_coop_rate: opponent_cooperations as f64 / denom,
            points_per_round: engine_score as f64 / denom,
            longest_opponent_defection_streak: longest_streak,
            tag_residence,
            opponent_bias_p_value: two_sided_binomial_p(
                opponent_cooperations as u64,
                rounds as u64,
                0.5,
            ),
        }
    }
}

/// Two-sided exact binomial test of `successes` out of `trials` against
/// success probability `p`. Returns 1.0 when the test is inapplicable
/// (zero trials or an invalid `p`).
pub fn two_sided_binomial_p(successes: u64, trials: u64, p: f64) -> f64 {
    if trials == 0 {
        return 1.0;
    }
    let Ok(binomial) = Binomial::new(p, trials) else {
        return 1.0;
    };
    let p_low = binomial.cdf(successes);
    let p_high = if successes == 0 {
        1.0
    } else {
        1.0 - binomial.cdf(successes - 1)
    };
    (2.0 * p_low.min(p_high)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassificationTag, Move};

    fn record(round: usize, engine_move: Move, opponent_move: Move) -> RoundRecord {
        let (engine_points, opponent_points) =
            crate::types::payoff::score(engine_move, opponent_move);
        RoundRecord {
            round,
            engine_move,
            opponent_move,
            engine_points,
            opponent_points,
            tag: ClassificationTag::Adaptive,
        }
    }

    #[test]
    fn test_stats_from_uniform_trace() {
        let records: Vec<_> = (1..=100)
            .map(|round| record(round, Move::Cooperate, Move::Cooperate))
            .collect();
        let stats = TraceStats::from_records(&records);
        assert_eq!(stats.rounds, 100);
        assert_eq!(stats.engine_coop_rate, 1.0);
        assert_eq!(stats.points_per_round, 3.0);
        assert_eq!(stats.longest_opponent_defection_streak, 0);
        assert_eq!(stats.tag_residence.get("ADAPTIVE"), Some(&100));
        // A pure cooperator is maximally biased away from a fair coin.
        assert!(stats.opponent_bias_p_value < 1e-6);
    }

    #[test]
    fn test_defection_streak_tracking() {
        let moves = [
            Move::Cooperate,
            Move::Defect,
            Move::Defect,
            Move::Defect,
            Move::Cooperate,
            Move::Defect,
        ];
        let records: Vec<_> = moves
            .iter()
            .enumerate()
            .map(|(i, &opp)| record(i + 1, Move::Cooperate, opp))
            .collect();
        let stats = TraceStats::from_records(&records);
        assert_eq!(stats.longest_opponent_defection_streak, 3);
    }

    #[test]
    fn test_balanced_trace_is_not_significant() {
        let records: Vec<_> = (1..=100)
            .map(|round| {
                let opp = if round % 2 == 0 {
                    Move::Defect
                } else {
                    Move::Cooperate
                };
                record(round, Move::Cooperate, opp)
            })
            .collect();
        let stats = TraceStats::from_records(&records);
        assert!(stats.opponent_bias_p_value > 0.5);
    }

    #[test]
    fn test_binomial_p_degenerate_inputs() {
        assert_eq!(two_sided_binomial_p(0, 0, 0.5), 1.0);
        assert_eq!(two_sided_binomial_p(5, 10, 2.0), 1.0);
    }

    #[test]
    fn test_empty_trace() {
        let stats = TraceStats::from_records(&[]);
        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.opponent_bias_p_value, 1.0);
    }
}
