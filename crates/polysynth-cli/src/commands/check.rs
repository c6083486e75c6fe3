//! Check command implementation
//!
//! Builds the song from a score without rendering it.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use crate::score_file::ScoreFile;

/// Run the check command
pub fn run(score_path: &Path) -> Result<ExitCode> {
    let score = ScoreFile::load(score_path)?;
    let base_dir = score_path.parent().unwrap_or(Path::new("."));
    let song = score.build_song(base_dir)?;

    println!("{} {}", "Score:".cyan().bold(), score_path.display());
    println!("  bpm      {}", score.bpm);
    println!("  voices   {}", song.playables().len());
    println!("  length   {:.3}s", song.length());
    println!(
        "  samples  {}",
        score.config.samples_for(song.length())
    );
    for playable in song.playables() {
        println!(
            "  {:>8.3}s  {:<10} {:.3}s",
            playable.start,
            playable.source.kind(),
            playable.length
        );
    }
    println!("{}", "OK".green().bold());
    Ok(ExitCode::SUCCESS)
}
