//! Threshold properties of the behavior classifier.

mod common;

use common::classify_pairs;
use dilemma::{ClassificationTag, EngineConfig, Move};

/// 95% cooperation over 50+ rounds with high stability must classify
/// COOPERATOR, with the defections spread so no two are adjacent.
#[test]
fn cooperator_at_ninety_five_percent() {
    let config = EngineConfig::default();
    for rounds in [60, 100, 120] {
        let pairs: Vec<(Move, Move)> = (1..=rounds)
            .map(|round| {
                let opp = if round % 20 == 10 {
                    Move::Defect
                } else {
                    Move::Cooperate
                };
                (Move::Cooperate, opp)
            })
            .collect();
        assert_eq!(
            classify_pairs(&config, &pairs),
            ClassificationTag::Cooperator,
            "{rounds} rounds at 95% cooperation"
        );
    }
}

#[test]
fn pure_cooperator_classifies_without_any_defections() {
    let config = EngineConfig::default();
    let pairs = vec![(Move::Cooperate, Move::Cooperate); 50];
    assert_eq!(
        classify_pairs(&config, &pairs),
        ClassificationTag::Cooperator
    );
}

/// 95% defection over 50+ rounds must classify DEFECTOR.
#[test]
fn defector_at_ninety_five_percent() {
    let config = EngineConfig::default();
    for rounds in [50, 80, 120] {
        let pairs: Vec<(Move, Move)> = (1..=rounds)
            .map(|round| {
                let opp = if round % 20 == 10 {
                    Move::Cooperate
                } else {
                    Move::Defect
                };
                (Move::Defect, opp)
            })
            .collect();
        assert_eq!(
            classify_pairs(&config, &pairs),
            ClassificationTag::Defector,
            "{rounds} rounds at 95% defection"
        );
    }
}

/// The defections of a sparse cooperator must not be mistaken for noise or
/// a pattern at any history length from 50 up.
#[test]
fn cooperator_is_stable_across_history_lengths() {
    let config = EngineConfig::default();
    for rounds in 50..=120 {
        let pairs: Vec<(Move, Move)> = (1..=rounds)
            .map(|round| {
                let opp = if round % 30 == 15 {
                    Move::Defect
                } else {
                    Move::Cooperate
                };
                (Move::Cooperate, opp)
            })
            .collect();
        assert_eq!(
            classify_pairs(&config, &pairs),
            ClassificationTag::Cooperator,
            "length {rounds}"
        );
    }
}
