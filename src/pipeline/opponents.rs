//! Baseline and synthetic opponents.
//!
//! These cover the recurring archetypes the engine classifies, so they
//! double as evaluation baselines and as the synthetic opponents the
//! detector and classifier tests drive.

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::OpponentStrategy,
    types::{Move, RoundOutcome},
};

/// Cooperates unconditionally.
pub struct AlwaysCooperate;

impl OpponentStrategy for AlwaysCooperate {
    fn begin(&mut self) -> Move {
        Move::Cooperate
    }

    fn respond(&mut self, _history: &[RoundOutcome]) -> Move {
        Move::Cooperate
    }

    fn name(&self) -> &str {
        "always-cooperate"
    }
}

/// Defects unconditionally.
pub struct AlwaysDefect;

impl OpponentStrategy for AlwaysDefect {
    fn begin(&mut self) -> Move {
        Move::Defect
    }

    fn respond(&mut self, _history: &[RoundOutcome]) -> Move {
        Move::Defect
    }

    fn name(&self) -> &str {
        "always-defect"
    }
}

/// Replays the other party's previous move.
pub struct TitForTat;

impl OpponentStrategy for TitForTat {
    fn begin(&mut self) -> Move {
        Move::Cooperate
    }

    fn respond(&mut self, history: &[RoundOutcome]) -> Move {
        history.last().map_or(Move::Cooperate, |r| r.opponent)
    }

    fn name(&self) -> &str {
        "tit-for-tat"
    }
}

/// Tit-for-tat that forgives a defection with fixed probability.
pub struct GenerousTitForTat {
    forgive_prob: f64,
    rng: StdRng,
}

impl GenerousTitForTat {
    pub fn new(forgive_prob: f64) -> Self {
        Self {
            forgive_prob,
            rng: StdRng::seed_from_u64(random()),
        }
    }
}

impl OpponentStrategy for GenerousTitForTat {
    fn begin(&mut self) -> Move {
        Move::Cooperate
    }

    fn respond(&mut self, history: &[RoundOutcome]) -> Move {
        match history.last().map(|r| r.opponent) {
            Some(Move::Defect) if self.rng.random::<f64>() >= self.forgive_prob => Move::Defect,
            _ => Move::Cooperate,
        }
    }

    fn name(&self) -> &str {
        "generous-tit-for-tat"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Cooperates until the first defection, then defects forever.
pub struct GrimTrigger {
    triggered: bool,
}

impl GrimTrigger {
    pub fn new() -> Self {
        Self { triggered: false }
    }
}

impl Default for GrimTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentStrategy for GrimTrigger {
    fn begin(&mut self) -> Move {
        self.triggered = false;
        Move::Cooperate
    }

    fn respond(&mut self, history: &[RoundOutcome]) -> Move {
        if history.last().is_some_and(|r| r.opponent == Move::Defect) {
            self.triggered = true;
        }
        if self.triggered {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn name(&self) -> &str {
        "grim-trigger"
    }
}

/// Strict alternation: cooperate, defect, cooperate, defect.
pub struct Alternator;

impl OpponentStrategy for Alternator {
    fn begin(&mut self) -> Move {
        Move::Cooperate
    }

    fn respond(&mut self, history: &[RoundOutcome]) -> Move {
        if history.len() % 2 == 0 {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn name(&self) -> &str {
        "alternator"
    }
}

/// Cooperates with fixed probability each round, independently.
pub struct RandomPlayer {
    coop_prob: f64,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(coop_prob: f64) -> Self {
        Self {
            coop_prob,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    fn draw(&mut self) -> Move {
        if self.rng.random::<f64>() < self.coop_prob {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

impl OpponentStrategy for RandomPlayer {
    fn begin(&mut self) -> Move {
        self.draw()
    }

    fn respond(&mut self, _history: &[RoundOutcome]) -> Move {
        self.draw()
    }

    fn name(&self) -> &str {
        "random"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Replays a fixed move cycle regardless of the other party.
pub struct CycleReplayer {
    cycle: Vec<Move>,
}

impl CycleReplayer {
    /// # Errors
    ///
    /// Returns an error if the cycle is empty.
    pub fn new(cycle: Vec<Move>) -> Result<Self> {
        if cycle.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "cycle replayer needs a non-empty cycle".to_string(),
            });
        }
        Ok(Self { cycle })
    }
}

impl OpponentStrategy for CycleReplayer {
    fn begin(&mut self) -> Move {
        self.cycle[0]
    }

    fn respond(&mut self, history: &[RoundOutcome]) -> Move {
        self.cycle[history.len() % self.cycle.len()]
    }

    fn name(&self) -> &str {
        "cycle-replayer"
    }
}

/// Defects on a fixed modular schedule during an opening probe window,
/// then settles into tit-for-tat.
pub struct CalibrationProbe {
    period: usize,
    residue: usize,
    probe_rounds: usize,
}

impl CalibrationProbe {
    /// # Errors
    ///
    /// Returns an error if the period is below 2 or the residue is not a
    /// valid residue class of the period.
    pub fn new(period: usize, residue: usize, probe_rounds: usize) -> Result<Self> {
        if period < 2 || residue >= period {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "calibration probe needs period >= 2 and residue < period, got {period}/{residue}"
                ),
            });
        }
        Ok(Self {
            period,
            residue,
            probe_rounds,
        })
    }
}

impl OpponentStrategy for CalibrationProbe {
    fn begin(&mut self) -> Move {
        if self.probe_rounds >= 1 && 1 % self.period == self.residue {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn respond(&mut self, history: &[RoundOutcome]) -> Move {
        let round = history.len() + 1;
        if round <= self.probe_rounds {
            if round % self.period == self.residue {
                Move::Defect
            } else {
                Move::Cooperate
            }
        } else {
            history.last().map_or(Move::Cooperate, |r| r.opponent)
        }
    }

    fn name(&self) -> &str {
        "calibration-probe"
    }
}

/// Names accepted by [`by_name`].
pub fn archetype_names() -> &'static [&'static str] {
    &[
        "always-cooperate",
        "always-defect",
        "tit-for-tat",
        "generous-tit-for-tat",
        "grim-trigger",
        "alternator",
        "random",
        "cycle-replayer",
        "calibration-probe",
    ]
}

/// Construct an opponent archetype by name, seeded for reproducibility.
///
/// # Errors
///
/// Returns [`Error::UnknownOpponent`] for names outside
/// [`archetype_names`].
pub fn by_name(name: &str, seed: u64) -> Result<Box<dyn OpponentStrategy>> {
    let mut opponent: Box<dyn OpponentStrategy> = match name {
        "always-cooperate" => Box::new(AlwaysCooperate),
        "always-defect" => Box::new(AlwaysDefect),
        "tit-for-tat" => Box::new(TitForTat),
        "generous-tit-for-tat" => Box::new(GenerousTitForTat::new(0.1)),
        "grim-trigger" => Box::new(GrimTrigger::new()),
        "alternator" => Box::new(Alternator),
        "random" => Box::new(RandomPlayer::new(0.5)),
        "cycle-replayer" => Box::new(CycleReplayer::new(vec![
            Move::Cooperate,
            Move::Cooperate,
            Move::Defect,
        ])?),
        "calibration-probe" => Box::new(CalibrationProbe::new(4, 0, 40)?),
        _ => {
            return Err(Error::UnknownOpponent {
                name: name.to_string(),
                expected: archetype_names().join(", "),
            });
        }
    };
    opponent.set_rng_seed(seed);
    Ok(opponent)
}
