//! The top-level decision policy: phases, per-tag handlers, endgame ramp.

pub mod budget;

pub use budget::ExploitBudgetManager;

use crate::{
    config::EngineConfig,
    model::OpponentModel,
    ports::RandomSource,
    types::{ClassificationTag, Move},
};

/// Match phase by round index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Trust building: cooperate unconditionally.
    Early,
    /// Tag-driven adaptive play.
    Mid,
    /// Endgame: weight shifts toward defection as the retaliation horizon
    /// closes.
    Late,
}

impl Phase {
    pub fn of(round: usize, config: &EngineConfig) -> Self {
        if round <= config.trust_build {
            Phase::Early
        } else if round > config.endgame_start() {
            Phase::Late
        } else {
            Phase::Mid
        }
    }
}

/// Emits one move per round from the classifier tag, the predictor
/// forecast, and the exploit budget.
#[derive(Debug, Clone, Default)]
pub struct DecisionPolicy {
    budget: ExploitBudgetManager,
}

impl DecisionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn budget(&self) -> &ExploitBudgetManager {
        &self.budget
    }

    /// Decide the move for the given 1-based round.
    pub fn decide(
        &mut self,
        config: &EngineConfig,
        tag: ClassificationTag,
        coop_forecast: f64,
        model: &OpponentModel,
        rng: &mut dyn RandomSource,
        round: usize,
    ) -> Move {
        match Phase::of(round, config) {
            Phase::Early => Move::Cooperate,
            Phase::Mid => {
                let chosen = self.tagged_move(config, tag, coop_forecast, model, rng, round);
                perturb(chosen, config, rng)
            }
            Phase::Late => {
                let chosen = self.late_move(config, tag, coop_forecast, model, rng, round);
                perturb(chosen, config, rng)
            }
        }
    }

    /// One handler per tag; the dispatch is this single exhaustive match.
    fn tagged_move(
        &mut self,
        config: &EngineConfig,
        tag: ClassificationTag,
        coop_forecast: f64,
        model: &OpponentModel,
        rng: &mut dyn RandomSource,
        round: usize,
    ) -> Move {
        match tag {
            ClassificationTag::Unknown => Move::Cooperate,
            ClassificationTag::Cooperator => self.exploit_or_cooperate(config, model, rng, round),
            ClassificationTag::Defector => Move::Defect,
            ClassificationTag::Noisy => noisy_move(config, model),
            ClassificationTag::Pattern => {
                self.pattern_move(config, coop_forecast, model, rng, round)
            }
            ClassificationTag::PeriodicCalibrator => {
                neutralize_schedule(model, round)
                    .unwrap_or_else(|| adaptive_move(config, coop_forecast, model, rng))
            }
            ClassificationTag::Reactive => mirror_move(model, config.forgive_prob, rng),
            ClassificationTag::Forgiving => {
                mirror_move(model, config.forgiving_forgive_prob, rng)
            }
            ClassificationTag::Adaptive => adaptive_move(config, coop_forecast, model, rng),
        }
    }

    /// Budgeted defection against a classified cooperator.
    fn exploit_or_cooperate(
        &mut self,
        config: &EngineConfig,
        model: &OpponentModel,
        rng: &mut dyn RandomSource,
        round: usize,
    ) -> Move {
        let streak = model.history().streak(Move::is_cooperate);
        let probability = self.budget.exploit_probability(config, round, streak);
        if self.budget.try_exploit(probability, rng) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    /// Exploit predicted cooperations, defend predicted defections.
    fn pattern_move(
        &mut self,
        config: &EngineConfig,
        coop_forecast: f64,
        model: &OpponentModel,
        rng: &mut dyn RandomSource,
        round: usize,
    ) -> Move {
        match model.pattern().predict(round) {
            Some(Move::Cooperate) => {
                if rng.chance(config.pattern_exploit_rate) {
                    Move::Defect
                } else {
                    Move::Cooperate
                }
            }
            Some(Move::Defect) => Move::Defect,
            None => adaptive_move(config, coop_forecast, model, rng),
        }
    }

    /// Endgame: ramp defection weight with progress through the window and
    /// the opponent's long-run cooperativeness, then hand the residual
    /// decision back to the tag handler. The final rounds defect outright;
    /// no retaliation horizon remains.
    fn late_move(
        &mut self,
        config: &EngineConfig,
        tag: ClassificationTag,
        coop_forecast: f64,
        model: &OpponentModel,
        rng: &mut dyn RandomSource,
        round: usize,
    ) -> Move {
        let remaining = config.expected_rounds.saturating_sub(round);
        if remaining < config.final_defect_rounds {
            return Move::Defect;
        }

        let span = config.endgame_window.max(1) as f64;
        let progress = (round.saturating_sub(config.endgame_start()) as f64 / span).min(1.0);
        let coop = model.history().coop_rate(config.long_window);
        let ceiling = config.late_defect_base + (1.0 - config.late_defect_base) * coop;
        if rng.chance(progress * ceiling) {
            return Move::Defect;
        }
        self.tagged_move(config, tag, coop_forecast, model, rng, round)
    }
}

/// Ignore isolated defections; retaliate only once the recent defect rate
/// clears the threshold.
fn noisy_move(config: &EngineConfig, model: &OpponentModel) -> Move {
    if model.history().defect_rate(config.short_window) > config.noisy_defect_threshold {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Deny a calibration probe its informative asymmetry: defect on residues
/// where the opponent is predicted to cooperate, cooperate on the residue
/// predicted to defect.
fn neutralize_schedule(model: &OpponentModel, round: usize) -> Option<Move> {
    let state = model.periodic().state()?;
    if state.predicts_defection(round) {
        Some(Move::Cooperate)
    } else {
        Some(Move::Defect)
    }
}

/// Mirror the opponent's last move, forgiving a defection with the given
/// probability.
fn mirror_move(model: &OpponentModel, forgive_prob: f64, rng: &mut dyn RandomSource) -> Move {
    match model.history().opponent_move_back(0) {
        Some(Move::Defect) if !rng.chance(forgive_prob) => Move::Defect,
        _ => Move::Cooperate,
    }
}

/// Expected-value comparison from the conditional cooperation estimates,
/// with the online forecast breaking near-ties and cooperation favored.
fn adaptive_move(
    config: &EngineConfig,
    coop_forecast: f64,
    model: &OpponentModel,
    rng: &mut dyn RandomSource,
) -> Move {
    let counts = model.history().counts();
    let p_coop_given_coop = counts.coop_given_coop();
    let p_coop_given_defect = counts.coop_given_defect();
    let ev_cooperate = 3.0 * p_coop_given_coop;
    let ev_defect = 5.0 * p_coop_given_defect + 1.0 * (1.0 - p_coop_given_defect);

    if (ev_defect - ev_cooperate).abs() < config.ev_margin {
        if coop_forecast < config.ev_tie_defect_cutoff {
            Move::Defect
        } else if rng.chance(config.ev_tie_coop_prob) {
            Move::Cooperate
        } else {
            Move::Defect
        }
    } else if ev_defect > ev_cooperate {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Uniform anti-meta-learning flip.
fn perturb(chosen: Move, config: &EngineConfig, rng: &mut dyn RandomSource) -> Move {
    if rng.chance(config.perturbation_rate) {
        chosen.flipped()
    } else {
        chosen
    }
}
