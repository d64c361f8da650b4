//! heartprep: Survey Encoding and Balanced Training CLI
//!
//! Encodes a health-survey CSV into a numeric feature matrix, or trains a
//! class-balanced logistic regression on it and reports metrics.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;

use heartprep::cli::{run_encode, run_train, Cli, Commands};
use heartprep::pipeline::EncodeConfig;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_env(Env::default().filter_or("HEARTPREP_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Encode(args)) => run_encode(&args.to_config()),
        Some(Commands::Train(args)) => run_train(&args.to_config()),
        None => run_encode(&EncodeConfig::default()),
    }
}
