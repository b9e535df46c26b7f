//! Core domain types: moves, round outcomes, and behavioral tags.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the two choices available each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Bit encoding used by the sliding windows: 0 = cooperate, 1 = defect.
    pub fn as_bit(self) -> u8 {
        match self {
            Move::Cooperate => 0,
            Move::Defect => 1,
        }
    }

    /// Decode from the window bit encoding.
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 { Move::Cooperate } else { Move::Defect }
    }

    pub fn is_cooperate(self) -> bool {
        self == Move::Cooperate
    }

    /// The other move.
    pub fn flipped(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Cooperate => write!(f, "C"),
            Move::Defect => write!(f, "D"),
        }
    }
}

impl FromStr for Move {
    type Err = crate::Error;

    /// Lenient parse accepting the representations harnesses are known to
    /// emit: "C"/"D", "cooperate"/"defect" in any case, and "0"/"1".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with('c') || lower == "0" {
            Ok(Move::Cooperate)
        } else if lower.starts_with('d') || lower == "1" {
            Ok(Move::Defect)
        } else {
            Err(crate::Error::InvalidMoveToken {
                token: s.to_string(),
            })
        }
    }
}

/// The completed (own, opponent) move pair for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub own: Move,
    pub opponent: Move,
}

impl RoundOutcome {
    pub fn new(own: Move, opponent: Move) -> Self {
        Self { own, opponent }
    }
}

impl From<(Move, Move)> for RoundOutcome {
    fn from((own, opponent): (Move, Move)) -> Self {
        Self { own, opponent }
    }
}

/// A history entry as supplied by the harness.
///
/// Either side of the pair may be absent when the harness recorded a round
/// it could not interpret. Incomplete rounds update no model counters; the
/// engine treats them as unknown and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRound {
    pub own: Option<Move>,
    pub opponent: Option<Move>,
}

impl RawRound {
    pub fn new(own: Option<Move>, opponent: Option<Move>) -> Self {
        Self { own, opponent }
    }

    /// Both moves present and usable.
    pub fn complete(&self) -> Option<RoundOutcome> {
        match (self.own, self.opponent) {
            (Some(own), Some(opponent)) => Some(RoundOutcome { own, opponent }),
            _ => None,
        }
    }
}

impl From<RoundOutcome> for RawRound {
    fn from(outcome: RoundOutcome) -> Self {
        Self {
            own: Some(outcome.own),
            opponent: Some(outcome.opponent),
        }
    }
}

impl From<(Move, Move)> for RawRound {
    fn from((own, opponent): (Move, Move)) -> Self {
        Self {
            own: Some(own),
            opponent: Some(opponent),
        }
    }
}

/// The engine's current hypothesis about the opponent's behavioral policy.
///
/// Exactly one tag holds at any round; tags are re-evaluated on a fixed
/// interval, not accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationTag {
    /// Too little history to commit to anything.
    Unknown,
    /// Cooperates almost unconditionally.
    Cooperator,
    /// Defects almost unconditionally.
    Defector,
    /// Near-unbiased, high-churn play with no detectable structure.
    Noisy,
    /// Replays a short repeating move cycle.
    Pattern,
    /// Defects on a fixed modular schedule during the opening probe phase.
    PeriodicCalibrator,
    /// Mirrors the engine's previous move, punishing defection.
    Reactive,
    /// Mirrors, but reliably recovers from mutual defection.
    Forgiving,
    /// No stable archetype; handled by expected-value reasoning.
    Adaptive,
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClassificationTag::Unknown => "UNKNOWN",
            ClassificationTag::Cooperator => "COOPERATOR",
            ClassificationTag::Defector => "DEFECTOR",
            ClassificationTag::Noisy => "NOISY",
            ClassificationTag::Pattern => "PATTERN",
            ClassificationTag::PeriodicCalibrator => "PERIODIC_CALIBRATOR",
            ClassificationTag::Reactive => "REACTIVE",
            ClassificationTag::Forgiving => "FORGIVING",
            ClassificationTag::Adaptive => "ADAPTIVE",
        };
        write!(f, "{name}")
    }
}

/// Standard prisoner's dilemma payoffs, from the mover's perspective.
pub mod payoff {
    /// Mutual cooperation.
    pub const REWARD: u32 = 3;
    /// Cooperated into a defection.
    pub const SUCKER: u32 = 0;
    /// Defected against a cooperation.
    pub const TEMPTATION: u32 = 5;
    /// Mutual defection.
    pub const PUNISHMENT: u32 = 1;

    use super::Move;

    /// Score one round for both parties: (own points, opponent points).
    pub fn score(own: Move, opponent: Move) -> (u32, u32) {
        match (own, opponent) {
            (Move::Cooperate, Move::Cooperate) => (REWARD, REWARD),
            (Move::Cooperate, Move::Defect) => (SUCKER, TEMPTATION),
            (Move::Defect, Move::Cooperate) => (TEMPTATION, SUCKER),
            (Move::Defect, Move::Defect) => (PUNISHMENT, PUNISHMENT),
        }
    }
}
