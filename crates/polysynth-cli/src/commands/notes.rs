//! Notes command implementation
//!
//! Prints the semitone id and frequency of note names.

use std::process::ExitCode;

use anyhow::{Context, Result};
use polysynth_engine::Tone;

/// Formats one note as `name  id  frequency`.
pub fn describe(notation: &str) -> Result<String> {
    let tone = Tone::parse(notation).with_context(|| format!("cannot parse '{notation}'"))?;
    Ok(format!(
        "{:<6} {:>4} {:>10.4} Hz",
        tone.to_string(),
        tone.semitone_id(),
        tone.frequency()
    ))
}

/// Run the notes command
pub fn run(notes: &[String]) -> Result<ExitCode> {
    for notation in notes {
        println!("{}", describe(notation)?);
    }
    Ok(ExitCode::SUCCESS)
}
