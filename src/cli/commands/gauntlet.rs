//! `gauntlet` command: sequential matches against every archetype.

use clap::Args;

use crate::{
    Engine, EngineConfig,
    cli::output,
    pipeline::{MatchConfig, MatchRunner, opponents},
};

/// Arguments for the `gauntlet` command.
#[derive(Args, Debug)]
pub struct GauntletArgs {
    /// Rounds per match
    #[arg(long, default_value_t = 1_000)]
    pub rounds: usize,

    /// Seed for deterministic play
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn execute(args: GauntletArgs) -> anyhow::Result<()> {
    println!(
        "Gauntlet: {} rounds per match, seed {}",
        args.rounds, args.seed
    );

    let mut total_engine = 0u64;
    let mut total_opponent = 0u64;
    for (index, name) in opponents::archetype_names().iter().enumerate() {
        let config = EngineConfig::default().with_expected_rounds(args.rounds);
        let mut engine = Engine::builder()
            .config(config)
            .seed(args.seed.wrapping_add(index as u64))
            .build()?;
        let mut opponent = opponents::by_name(name, args.seed.wrapping_add(index as u64))?;

        let mut runner = MatchRunner::new(MatchConfig {
            rounds: args.rounds,
            seed: Some(args.seed),
        });
        let report = runner.run(&mut engine, opponent.as_mut())?;
        output::print_gauntlet_row(&report);
        total_engine += report.engine_score;
        total_opponent += report.opponent_score;
    }

    println!("{:<22} {total_engine:>8} : {total_opponent:<8}", "total");
    Ok(())
}
