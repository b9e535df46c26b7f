//! The engine façade: one instance per match, one move per round.

use crate::{
    Result,
    adapters::{EntropySource, SeededSource},
    config::EngineConfig,
    model::OpponentModel,
    policy::DecisionPolicy,
    ports::RandomSource,
    types::{ClassificationTag, Move, RawRound},
};

/// Adaptive opponent-modeling decision engine.
///
/// The engine owns all per-match state: the [`OpponentModel`] aggregate,
/// the [`DecisionPolicy`] with its exploit budget, and a boxed
/// [`RandomSource`]. `begin_match` resets everything and returns the first
/// move; `play_round` consumes the harness-supplied history incrementally
/// and returns the move for the upcoming round. Both are total: malformed
/// history entries are treated as unknown rounds and never panic.
///
/// # Examples
///
/// ```
/// use dilemma::{Engine, EngineConfig, Move, RawRound};
///
/// let mut engine = Engine::builder()
///     .config(EngineConfig::default())
///     .seed(42)
///     .build()?;
///
/// let first = engine.begin_match();
/// assert_eq!(first, Move::Cooperate);
///
/// let history = vec![RawRound::from((first, Move::Cooperate))];
/// let _second = engine.play_round(&history);
/// # Ok::<(), dilemma::Error>(())
/// ```
pub struct Engine {
    config: EngineConfig,
    rng: Box<dyn RandomSource>,
    model: OpponentModel,
    policy: DecisionPolicy,
    consumed: usize,
    last_tag: ClassificationTag,
}

impl Engine {
    /// Create an engine with the given configuration and the production
    /// entropy source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_source(config, Box::new(EntropySource::new()))
    }

    /// Create an engine with an explicit randomness source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_source(config: EngineConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            model: OpponentModel::new(&config),
            policy: DecisionPolicy::new(),
            consumed: 0,
            last_tag: ClassificationTag::Unknown,
            config,
            rng,
        })
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Reset all per-match state and return the first move.
    ///
    /// Must be called once before round 1 of every match; state from a
    /// previous match never survives into the next one.
    pub fn begin_match(&mut self) -> Move {
        self.model = OpponentModel::new(&self.config);
        self.policy = DecisionPolicy::new();
        self.consumed = 0;
        self.last_tag = ClassificationTag::Unknown;
        self.decide(1)
    }

    /// Return the move for the upcoming round given all completed rounds.
    ///
    /// The history is expected to grow by one entry per round, but the
    /// engine tolerates any growth: every entry not yet consumed is folded
    /// into the model before deciding.
    pub fn play_round(&mut self, history: &[RawRound]) -> Move {
        for entry in history.iter().skip(self.consumed) {
            self.consumed += 1;
            match entry.complete() {
                Some(outcome) => self.model.observe(outcome, self.consumed),
                None => self.model.skip_round(),
            }
        }
        self.decide(self.consumed + 1)
    }

    fn decide(&mut self, round: usize) -> Move {
        let tag = self.model.classify(&self.config, round);
        self.last_tag = tag;
        let forecast = self.model.forecast_cooperation();
        self.policy.decide(
            &self.config,
            tag,
            forecast,
            &self.model,
            self.rng.as_mut(),
            round,
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The behavioral tag as of the most recent decision.
    pub fn current_tag(&self) -> ClassificationTag {
        self.last_tag
    }

    /// Exploitative defections drawn against classified cooperators so far
    /// this match.
    pub fn exploits_used(&self) -> usize {
        self.policy.budget().used()
    }

    /// The lifetime exploit cap, once it has been fixed.
    pub fn exploit_cap(&self) -> Option<usize> {
        self.policy.budget().cap()
    }
}

/// Builder for [`Engine`] construction.
///
/// # Examples
///
/// ```
/// use dilemma::{Engine, EngineConfig};
///
/// let engine = Engine::builder()
///     .config(EngineConfig::default().with_expected_rounds(1_000))
///     .seed(7)
///     .build()?;
/// # Ok::<(), dilemma::Error>(())
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    source: Option<Box<dyn RandomSource>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            source: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a deterministic seeded source.
    pub fn seed(mut self, seed: u64) -> Self {
        self.source = Some(Box::new(SeededSource::new(seed)));
        self
    }

    /// Use a custom randomness source.
    pub fn source(mut self, source: Box<dyn RandomSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the engine, falling back to the production entropy source
    /// when no source was supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn build(self) -> Result<Engine> {
        let source = self
            .source
            .unwrap_or_else(|| Box::new(EntropySource::new()));
        Engine::with_source(self.config, source)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
