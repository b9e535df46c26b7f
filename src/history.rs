//! Per-match outcome log and the statistics derived from it.
//!
//! Every component above this one consumes `OutcomeHistory`: the classifier
//! reads rates and stability, the detectors read the opponent move window,
//! the predictor reads recent moves and conditional probabilities. Counters
//! update in O(1) per recorded round; windowed statistics walk at most the
//! retained window.

use std::collections::VecDeque;

use crate::types::{Move, RoundOutcome};

/// Counts of the four (own, opponent) move combinations seen so far.
///
/// Invariant: `cc + cd + dc + dd` equals the number of recorded rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionCounts {
    /// Own cooperate, opponent cooperate.
    pub cc: usize,
    /// Own cooperate, opponent defect.
    pub cd: usize,
    /// Own defect, opponent cooperate.
    pub dc: usize,
    /// Own defect, opponent defect.
    pub dd: usize,
}

impl TransitionCounts {
    pub fn total(&self) -> usize {
        self.cc + self.cd + self.dc + self.dd
    }

    /// P(opponent cooperates | we cooperated last round they responded to).
    /// Neutral prior 0.5 with no samples.
    pub fn coop_given_coop(&self) -> f64 {
        ratio_or_neutral(self.cc, self.cc + self.cd)
    }

    /// P(opponent cooperates | we defected). Neutral prior 0.5.
    pub fn coop_given_defect(&self) -> f64 {
        ratio_or_neutral(self.dc, self.dc + self.dd)
    }

    /// Fraction of all rounds where our cooperation met a defection.
    pub fn betrayal_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.cd as f64 / self.total() as f64
        }
    }

    fn record(&mut self, outcome: RoundOutcome) {
        match (outcome.own, outcome.opponent) {
            (Move::Cooperate, Move::Cooperate) => self.cc += 1,
            (Move::Cooperate, Move::Defect) => self.cd += 1,
            (Move::Defect, Move::Cooperate) => self.dc += 1,
            (Move::Defect, Move::Defect) => self.dd += 1,
        }
    }
}

fn ratio_or_neutral(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.5
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Append-only log of completed rounds with bounded sliding windows.
///
/// The cumulative counters never reset; only the per-move windows evict
/// (oldest first) once `memory_limit` is exceeded, and every windowed
/// statistic reads from those same windows.
#[derive(Debug, Clone)]
pub struct OutcomeHistory {
    memory_limit: usize,
    own_bits: VecDeque<u8>,
    opp_bits: VecDeque<u8>,
    counts: TransitionCounts,
    rounds: usize,
    mirror_matches: usize,
    mirror_pairs: usize,
    dd_recoveries: usize,
    dd_followups: usize,
    prev: Option<RoundOutcome>,
}

impl OutcomeHistory {
    pub fn new(memory_limit: usize) -> Self {
        Self {
            memory_limit: memory_limit.max(1),
            own_bits: VecDeque::new(),
            opp_bits: VecDeque::new(),
            counts: TransitionCounts::default(),
            rounds: 0,
            mirror_matches: 0,
            mirror_pairs: 0,
            dd_recoveries: 0,
            dd_followups: 0,
            prev: None,
        }
    }

    /// Append one completed round. O(1).
    pub fn record(&mut self, own: Move, opponent: Move) {
        let outcome = RoundOutcome::new(own, opponent);
        self.counts.record(outcome);

        if let Some(prev) = self.prev {
            self.mirror_pairs += 1;
            if opponent == prev.own {
                self.mirror_matches += 1;
            }
            if prev.own == Move::Defect && prev.opponent == Move::Defect {
                self.dd_followups += 1;
                if opponent == Move::Cooperate {
                    self.dd_recoveries += 1;
                }
            }
        }

        self.own_bits.push_back(own.as_bit());
        self.opp_bits.push_back(opponent.as_bit());
        while self.opp_bits.len() > self.memory_limit {
            self.opp_bits.pop_front();
            self.own_bits.pop_front();
        }

        self.prev = Some(outcome);
        self.rounds += 1;
    }

    /// Total completed rounds recorded, including any evicted from the
    /// windows.
    pub fn len(&self) -> usize {
        self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.rounds == 0
    }

    /// Rounds currently retained in the sliding windows.
    pub fn retained(&self) -> usize {
        self.opp_bits.len()
    }

    /// 1-based round number of the oldest retained window entry.
    pub fn first_retained_round(&self) -> usize {
        self.rounds - self.retained() + 1
    }

    pub fn counts(&self) -> &TransitionCounts {
        &self.counts
    }

    /// Opponent move bits (0 = cooperate) in chronological order.
    pub fn opponent_bits(&self) -> impl DoubleEndedIterator<Item = u8> + ExactSizeIterator {
        self.opp_bits.iter().copied()
    }

    /// The opponent's move `back` rounds ago (0 = most recent).
    pub fn opponent_move_back(&self, back: usize) -> Option<Move> {
        self.opp_bits
            .get(self.opp_bits.len().checked_sub(back + 1)?)
            .copied()
            .map(Move::from_bit)
    }

    /// Our own move `back` rounds ago (0 = most recent).
    pub fn own_move_back(&self, back: usize) -> Option<Move> {
        self.own_bits
            .get(self.own_bits.len().checked_sub(back + 1)?)
            .copied()
            .map(Move::from_bit)
    }

    /// Opponent cooperation fraction over the last `window` rounds (or all
    /// retained rounds if fewer). Neutral prior 0.5 on an empty history.
    pub fn coop_rate(&self, window: usize) -> f64 {
        windowed_coop_rate(&self.opp_bits, window)
    }

    /// Own cooperation fraction over the last `window` rounds.
    pub fn own_coop_rate(&self, window: usize) -> f64 {
        windowed_coop_rate(&self.own_bits, window)
    }

    /// Opponent defection fraction over the last `window` rounds.
    pub fn defect_rate(&self, window: usize) -> f64 {
        1.0 - self.coop_rate(window)
    }

    /// Length of the trailing run of opponent moves satisfying `predicate`.
    pub fn streak<F: Fn(Move) -> bool>(&self, predicate: F) -> usize {
        self.opp_bits
            .iter()
            .rev()
            .take_while(|&&bit| predicate(Move::from_bit(bit)))
            .count()
    }

    /// Move-to-move stability of the opponent over the last `window`
    /// rounds: `1 − transitions / roundsConsidered`. 1.0 with fewer than
    /// two samples.
    pub fn stability(&self, window: usize) -> f64 {
        1.0 - self.change_rate(window)
    }

    /// Fraction of adjacent opponent move pairs that differ, over the last
    /// `window` rounds. 0.0 with fewer than two samples.
    pub fn change_rate(&self, window: usize) -> f64 {
        let take = window.min(self.opp_bits.len());
        if take < 2 {
            return 0.0;
        }
        let start = self.opp_bits.len() - take;
        let mut changes = 0;
        let mut prev: Option<u8> = None;
        for &bit in self.opp_bits.iter().skip(start) {
            if let Some(p) = prev
                && p != bit
            {
                changes += 1;
            }
            prev = Some(bit);
        }
        changes as f64 / (take - 1) as f64
    }

    /// Fraction of rounds where the opponent's move equaled our previous
    /// move. High values indicate tit-for-tat-like mirroring.
    pub fn mirror_ratio(&self) -> f64 {
        ratio_or_neutral(self.mirror_matches, self.mirror_pairs)
    }

    /// P(opponent cooperates | previous round was mutual defection).
    /// Neutral prior 0.5 until a mutual defection has been followed up.
    pub fn recovery_after_mutual_defection(&self) -> f64 {
        ratio_or_neutral(self.dd_recoveries, self.dd_followups)
    }

    /// Structure score of the opponent's trailing moves.
    ///
    /// Averages the cooperate/defect imbalance with the distance of the
    /// move-to-move change rate from 0.5 (the signature of i.i.d. coin
    /// flips). Low values mean the play looks random; 1.0 means fewer than
    /// `min_samples` moves are available and randomness cannot be called.
    pub fn randomness_signal(&self, window: usize, min_samples: usize) -> f64 {
        let take = window.min(self.opp_bits.len());
        if take < min_samples {
            return 1.0;
        }
        let start = self.opp_bits.len() - take;
        let defects: usize = self.opp_bits.iter().skip(start).map(|&b| b as usize).sum();
        let cooperations = take - defects;
        let imbalance = cooperations.abs_diff(defects) as f64 / take as f64;
        let change_distance = (self.change_rate(window) - 0.5).abs();
        ((imbalance + change_distance) / 2.0).clamp(0.0, 1.0)
    }
}

fn windowed_coop_rate(bits: &VecDeque<u8>, window: usize) -> f64 {
    let take = window.min(bits.len());
    if take == 0 {
        return 0.5;
    }
    let start = bits.len() - take;
    let cooperations = bits.iter().skip(start).filter(|&&bit| bit == 0).count();
    cooperations as f64 / take as f64
}
