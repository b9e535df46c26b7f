//! Dilemma CLI - run the adaptive engine against built-in opponents.
//!
//! This CLI provides:
//! - Single matches against a named archetype with report/trace export
//! - A gauntlet sweep across every built-in archetype

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dilemma")]
#[command(version, about = "Adaptive opponent-modeling engine for iterated dilemma games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one match against a named opponent archetype
    Run(dilemma::cli::commands::run::RunArgs),

    /// Run the engine against every built-in archetype
    Gauntlet(dilemma::cli::commands::gauntlet::GauntletArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => dilemma::cli::commands::run::execute(args),
        Commands::Gauntlet(args) => dilemma::cli::commands::gauntlet::execute(args),
    }
}
