//! polysynth CLI - renders JSON scores to WAV files.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use polysynth_cli::{commands, logging};

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            score,
            output,
            seed,
            sequential,
        } => commands::render::run(&score, &output, seed, sequential),
        Commands::Check { score } => commands::check::run(&score),
        Commands::Notes { notes } => commands::notes::run(&notes),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}
