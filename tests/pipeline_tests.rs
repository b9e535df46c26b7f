//! Integration tests for the match pipeline, observers and exporters.

mod common;

use common::seeded_engine;
use dilemma::{
    analysis::TraceStats,
    export::TraceCsvExporter,
    pipeline::{
        AlwaysDefect, MatchConfig, MatchRunner, MetricsObserver, TitForTat, TraceRecorder,
        opponents,
    },
};

#[test]
fn match_against_tit_for_tat_sustains_cooperation() {
    let rounds = 800;
    let mut engine = seeded_engine(21, rounds);
    let mut opponent = TitForTat;
    let mut runner = MatchRunner::new(MatchConfig {
        rounds,
        seed: Some(21),
    });
    let report = runner.run(&mut engine, &mut opponent).unwrap();

    assert_eq!(report.rounds, rounds);
    assert!(
        report.mutual_cooperation_rate > 0.5,
        "mutual cooperation rate {}",
        report.mutual_cooperation_rate
    );
    // Tit-for-tat keeps scores close; nobody runs away with the match.
    let diff = report.engine_score.abs_diff(report.opponent_score);
    assert!(diff < (rounds as u64) / 2, "score gap {diff}");
}

#[test]
fn match_against_always_defect_limits_damage() {
    let rounds = 500;
    let mut engine = seeded_engine(22, rounds);
    let mut opponent = AlwaysDefect;
    let mut runner = MatchRunner::new(MatchConfig {
        rounds,
        seed: Some(22),
    });
    let report = runner.run(&mut engine, &mut opponent).unwrap();

    // Once classified, the engine stops feeding the defector: its own
    // cooperation collapses to the trust window plus noise.
    assert!(
        report.engine_coop_rate < 0.1,
        "engine cooperation {} against a pure defector",
        report.engine_coop_rate
    );
    assert_eq!(report.opponent_coop_rate, 0.0);
}

#[test]
fn observers_see_every_round() {
    let rounds = 300;
    let mut engine = seeded_engine(23, rounds);
    let mut opponent = TitForTat;

    let recorder = TraceRecorder::new();
    let sink = recorder.sink();
    let mut runner = MatchRunner::new(MatchConfig {
        rounds,
        seed: Some(23),
    })
    .with_observer(Box::new(recorder))
    .with_observer(Box::new(MetricsObserver::new()));

    let report = runner.run(&mut engine, &mut opponent).unwrap();

    let records = sink.lock().unwrap();
    assert_eq!(records.len(), rounds);
    assert_eq!(records[0].round, 1);
    assert_eq!(records[rounds - 1].round, rounds);

    // The trace reproduces the report's aggregates.
    let stats = TraceStats::from_records(&records);
    assert_eq!(stats.rounds, rounds);
    assert!((stats.engine_coop_rate - report.engine_coop_rate).abs() < 1e-9);
    assert!((stats.opponent_coop_rate - report.opponent_coop_rate).abs() < 1e-9);
    let engine_total: u64 = records.iter().map(|r| u64::from(r.engine_points)).sum();
    assert_eq!(engine_total, report.engine_score);
}

#[test]
fn trace_exports_to_csv() {
    let rounds = 120;
    let mut engine = seeded_engine(24, rounds);
    let mut opponent = TitForTat;

    let recorder = TraceRecorder::new();
    let sink = recorder.sink();
    let mut runner = MatchRunner::new(MatchConfig {
        rounds,
        seed: Some(24),
    })
    .with_observer(Box::new(recorder));
    runner.run(&mut engine, &mut opponent).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    let records = sink.lock().unwrap();
    TraceCsvExporter::new().write(&records, file.path()).unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(contents.lines().count(), rounds + 1, "header plus rows");
}

#[test]
fn every_archetype_completes_a_match() {
    for (index, name) in opponents::archetype_names().iter().enumerate() {
        let rounds = 200;
        let seed = 30 + index as u64;
        let mut engine = seeded_engine(seed, rounds);
        let mut opponent = opponents::by_name(name, seed).unwrap();
        let mut runner = MatchRunner::new(MatchConfig {
            rounds,
            seed: Some(seed),
        });
        let report = runner.run(&mut engine, opponent.as_mut()).unwrap();
        assert_eq!(report.rounds, rounds, "{name}");
        assert_eq!(report.opponent, *name, "{name}");
    }
}

#[test]
fn report_json_round_trip() {
    let rounds = 150;
    let mut engine = seeded_engine(40, rounds);
    let mut opponent = TitForTat;
    let mut runner = MatchRunner::new(MatchConfig {
        rounds,
        seed: Some(40),
    });
    let report = runner.run(&mut engine, &mut opponent).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    report.save(file.path()).unwrap();
    let loaded = dilemma::pipeline::MatchReport::load(file.path()).unwrap();
    assert_eq!(loaded.rounds, report.rounds);
    assert_eq!(loaded.engine_score, report.engine_score);
    assert_eq!(loaded.opponent, report.opponent);
}
