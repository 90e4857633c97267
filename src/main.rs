mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate(args) => commands::generate::run(&cli, args),
        Commands::Validate(args) => commands::validate::run(&cli, args),
    }
}
