//! Shared helpers for the integration suites.

#![allow(dead_code)] // each suite uses its own subset of these helpers

use dilemma::{Engine, EngineConfig, Move, OpponentModel, RawRound, RoundOutcome};

/// Engine with a deterministic source and a shortened match horizon.
pub fn seeded_engine(seed: u64, expected_rounds: usize) -> Engine {
    Engine::builder()
        .config(EngineConfig::default().with_expected_rounds(expected_rounds))
        .seed(seed)
        .build()
        .expect("engine config must validate")
}

/// Feed an (own, opponent) move sequence into a fresh opponent model.
pub fn model_from_pairs(config: &EngineConfig, pairs: &[(Move, Move)]) -> OpponentModel {
    let mut model = OpponentModel::new(config);
    for (index, &(own, opp)) in pairs.iter().enumerate() {
        model.observe(RoundOutcome::new(own, opp), index + 1);
    }
    model
}

/// Classify a hand-built history with a fresh classifier, evaluating at
/// the round after the last recorded one.
pub fn classify_pairs(config: &EngineConfig, pairs: &[(Move, Move)]) -> dilemma::ClassificationTag {
    let mut model = model_from_pairs(config, pairs);
    model.classify(config, pairs.len() + 1)
}

/// Drive an engine for `rounds` rounds against a closure producing the
/// opponent's move from the 1-based round number. Returns the engine's
/// moves in order.
pub fn drive_engine<F>(engine: &mut Engine, rounds: usize, mut opponent: F) -> Vec<Move>
where
    F: FnMut(usize) -> Move,
{
    let mut history: Vec<RawRound> = Vec::with_capacity(rounds);
    let mut moves = Vec::with_capacity(rounds);
    for round in 1..=rounds {
        let own = if round == 1 {
            engine.begin_match()
        } else {
            engine.play_round(&history)
        };
        moves.push(own);
        history.push(RawRound::from((own, opponent(round))));
    }
    moves
}
