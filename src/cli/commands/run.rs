//! `run` command: one match against a named opponent archetype.

use std::path::PathBuf;

use clap::Args;

use crate::{
    Engine, EngineConfig,
    analysis::TraceStats,
    cli::output,
    export::TraceCsvExporter,
    pipeline::{MatchConfig, MatchRunner, ProgressObserver, TraceRecorder, opponents},
};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Opponent archetype to play against
    #[arg(long, default_value = "tit-for-tat")]
    pub opponent: String,

    /// Number of rounds to play
    #[arg(long, default_value_t = 10_000)]
    pub rounds: usize,

    /// Seed for deterministic play (engine and opponent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the match report to a JSON file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write the full round trace to a CSV file
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(long)]
    pub quiet: bool,
}

pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let config = EngineConfig::default().with_expected_rounds(args.rounds);
    let mut builder = Engine::builder().config(config);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut engine = builder.build()?;

    let mut opponent = opponents::by_name(&args.opponent, args.seed.unwrap_or(0))?;

    let recorder = TraceRecorder::new();
    let sink = recorder.sink();
    let mut runner = MatchRunner::new(MatchConfig {
        rounds: args.rounds,
        seed: args.seed,
    })
    .with_observer(Box::new(recorder));
    if !args.quiet {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }

    let report = runner.run(&mut engine, opponent.as_mut())?;

    output::print_report(&report);
    let records = sink
        .lock()
        .map_err(|_| anyhow::anyhow!("trace sink poisoned"))?;
    output::print_stats(&TraceStats::from_records(&records));

    if let Some(path) = &args.report {
        report.save(path)?;
        println!("report written to {}", path.display());
    }
    if let Some(path) = &args.trace {
        TraceCsvExporter::new().write(&records, path)?;
        println!("trace written to {}", path.display());
    }

    Ok(())
}
