//! Bounded exploitation of classified cooperators.

use crate::{config::EngineConfig, ports::RandomSource};

/// Caps cumulative opportunistic defections against a generous opponent.
///
/// The lifetime cap is computed once, the first time the classifier holds
/// COOPERATOR, and never recomputed. Each round the remaining allowance is
/// amortized over the expected remaining rounds and further capped by a
/// per-round rate that grows with the opponent's unbroken cooperation
/// streak. Exploits are drawn, never scheduled, so the pattern of
/// defections carries no detectable fixed period.
#[derive(Debug, Clone, Default)]
pub struct ExploitBudgetManager {
    cap: Option<usize>,
    used: usize,
}

impl ExploitBudgetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exploitative defections taken so far this match.
    pub fn used(&self) -> usize {
        self.used
    }

    /// The lifetime cap, once it has been fixed.
    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    /// Probability of exploiting on this round.
    pub fn exploit_probability(
        &mut self,
        config: &EngineConfig,
        round: usize,
        cooperation_streak: usize,
    ) -> f64 {
        let remaining = config.expected_rounds.saturating_sub(round).max(1);
        let cap = *self
            .cap
            .get_or_insert_with(|| (config.max_exploit_fraction * remaining as f64).ceil() as usize);

        let streak_bonus = config.exploit_streak_bonus
            * cooperation_streak.saturating_sub(config.exploit_streak_floor) as f64;
        let rate_cap = (config.base_exploit_rate + streak_bonus).min(config.max_exploit_rate);

        let allowance = cap.saturating_sub(self.used) as f64 / remaining as f64;
        rate_cap.min(allowance).max(0.0)
    }

    /// Draw an exploit with the given probability, recording it on success.
    pub fn try_exploit(&mut self, probability: f64, rng: &mut dyn RandomSource) -> bool {
        if rng.chance(probability) {
            self.used += 1;
            true
        } else {
            false
        }
    }
}
