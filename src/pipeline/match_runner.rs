//! Match loop: engine versus one opponent, scored and observed.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    engine::Engine,
    ports::{MatchObserver, OpponentStrategy},
    types::{ClassificationTag, Move, RawRound, RoundOutcome, payoff},
};

/// Match configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of rounds to play.
    pub rounds: usize,

    /// Seed applied to the opponent's randomness, if any. The engine's
    /// source is fixed at engine construction.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: 10_000,
            seed: None,
        }
    }
}

/// Everything known about one completed round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: usize,
    pub engine_move: Move,
    pub opponent_move: Move,
    pub engine_points: u32,
    pub opponent_points: u32,
    /// The engine's behavioral tag when it chose this round's move.
    pub tag: ClassificationTag,
}

/// Result of a completed match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub opponent: String,
    pub rounds: usize,
    pub engine_score: u64,
    pub opponent_score: u64,
    pub engine_coop_rate: f64,
    pub opponent_coop_rate: f64,
    /// Fraction of rounds that were mutual cooperation.
    pub mutual_cooperation_rate: f64,
    /// Budgeted exploitative defections the engine drew.
    pub exploit_defections: usize,
}

impl MatchReport {
    /// Save the report to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialized.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a report from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}

/// Drives one engine against one opponent for a configured number of
/// rounds, notifying observers as the match progresses.
pub struct MatchRunner {
    config: MatchConfig,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline.
    pub fn with_observer(mut self, observer: Box<dyn MatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the full match.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero-round configuration or if an observer
    /// fails.
    pub fn run(
        &mut self,
        engine: &mut Engine,
        opponent: &mut dyn OpponentStrategy,
    ) -> Result<MatchReport> {
        if self.config.rounds == 0 {
            return Err(Error::EmptyMatch { rounds: 0 });
        }
        if let Some(seed) = self.config.seed {
            opponent.set_rng_seed(seed.wrapping_add(1));
        }

        for observer in &mut self.observers {
            observer.on_match_start(self.config.rounds)?;
        }

        let mut engine_history: Vec<RawRound> = Vec::with_capacity(self.config.rounds);
        let mut opponent_history: Vec<RoundOutcome> = Vec::with_capacity(self.config.rounds);
        let mut engine_score = 0u64;
        let mut opponent_score = 0u64;
        let mut engine_cooperations = 0usize;
        let mut opponent_cooperations = 0usize;
        let mut mutual_cooperations = 0usize;

        for round in 1..=self.config.rounds {
            let engine_move = if round == 1 {
                engine.begin_match()
            } else {
                engine.play_round(&engine_history)
            };
            let opponent_move = if round == 1 {
                opponent.begin()
            } else {
                opponent.respond(&opponent_history)
            };

            let (engine_points, opponent_points) = payoff::score(engine_move, opponent_move);
            engine_score += u64::from(engine_points);
            opponent_score += u64::from(opponent_points);
            if engine_move.is_cooperate() {
                engine_cooperations += 1;
            }
            if opponent_move.is_cooperate() {
                opponent_cooperations += 1;
                if engine_move.is_cooperate() {
                    mutual_cooperations += 1;
                }
            }

            engine_history.push(RawRound::from((engine_move, opponent_move)));
            opponent_history.push(RoundOutcome::new(opponent_move, engine_move));

            let record = RoundRecord {
                round,
                engine_move,
                opponent_move,
                engine_points,
                opponent_points,
                tag: engine.current_tag(),
            };
            for observer in &mut self.observers {
                observer.on_round(&record)?;
            }
        }

        let rounds = self.config.rounds as f64;
        let report = MatchReport {
            opponent: opponent.name().to_string(),
            rounds: self.config.rounds,
            engine_score,
            opponent_score,
            engine_coop_rate: engine_cooperations as f64 / rounds,
            opponent_coop_rate: opponent_cooperations as f64 / rounds,
            mutual_cooperation_rate: mutual_cooperations as f64 / rounds,
            exploit_defections: engine.exploits_used(),
        };

        for observer in &mut self.observers {
            observer.on_match_end(&report)?;
        }

        Ok(report)
    }
}
