//! `rulegate`: prune declarative validation rules against a record from the
//! command line.

mod cli;
mod commands;
mod logging;

use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Prune(args) => commands::run_prune(&args),
        Command::Check(args) => commands::run_check(&args),
    }
}
