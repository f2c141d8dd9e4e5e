mod calculate_cmd;
mod cli;
mod config;
mod holidays_cmd;
mod logging;
mod output;
mod rule_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::DeadlineConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = DeadlineConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Calculate(args) => calculate_cmd::run(args, &config),
        Command::Rule(args) => rule_cmd::run(args, &config),
        Command::Holidays(args) => holidays_cmd::run(args, &config),
    }
}
