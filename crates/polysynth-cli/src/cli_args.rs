//! CLI argument definitions for the polysynth command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// polysynth - Polyphonic additive synthesizer
#[derive(Parser, Debug)]
#[command(name = "polysynth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a JSON score to a WAV file
    Render {
        /// Path to the score file (JSON)
        #[arg(short, long)]
        score: PathBuf,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Override the score's random seed
        #[arg(long)]
        seed: Option<u32>,

        /// Render voices on one thread
        #[arg(long)]
        sequential: bool,
    },

    /// Parse a score and report its voices without rendering
    Check {
        /// Path to the score file (JSON)
        #[arg(short, long)]
        score: PathBuf,
    },

    /// Print semitone id and frequency of note names
    Notes {
        /// Notes such as a4, c#3 or eb5
        #[arg(required = true)]
        notes: Vec<String>,
    },
}
