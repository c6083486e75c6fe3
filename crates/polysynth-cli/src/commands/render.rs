//! Render command implementation
//!
//! Loads a score file, renders the song and writes it as WAV.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use polysynth_engine::{PlaybackSink, WavFileSink};
use tracing::info;

use crate::score_file::ScoreFile;

/// Run the render command
///
/// # Arguments
/// * `score_path` - Path to the JSON score
/// * `output` - WAV file to write
/// * `seed` - Seed overriding the score's own
/// * `sequential` - Disable parallel voice rendering
pub fn run(score_path: &Path, output: &Path, seed: Option<u32>, sequential: bool) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Rendering:".cyan().bold(), score_path.display());

    let mut score = ScoreFile::load(score_path)?;
    if let Some(seed) = seed {
        score.seed = seed;
    }
    if sequential {
        score.config.parallel = false;
    }

    let base_dir = score_path.parent().unwrap_or(Path::new("."));
    let song = score.build_song(base_dir)?;
    info!(
        voices = song.playables().len(),
        seconds = song.length(),
        seed = score.seed,
        "built song"
    );

    let render = song.render(&score.config).context("render failed")?;

    let mut sink = WavFileSink::new(output);
    sink.play(&render.samples, render.sample_rate, true)
        .with_context(|| format!("failed to write '{}'", output.display()))?;

    println!(
        "{} {} ({:.2}s, {} voices, peak {})",
        "Wrote:".green().bold(),
        output.display(),
        render.duration(),
        render.voices,
        render.peak()
    );
    if render.clipped_samples > 0 {
        println!(
            "{} {} samples clipped",
            "Warning:".yellow().bold(),
            render.clipped_samples
        );
    }
    if let Some(wav) = sink.last_written() {
        println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);
    }
    println!(
        "{} {:.0?}",
        "Elapsed:".dimmed(),
        start.elapsed()
    );

    Ok(ExitCode::SUCCESS)
}
