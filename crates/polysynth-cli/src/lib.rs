//! polysynth CLI library
//!
//! Score file loading and the command implementations behind the `polysynth`
//! binary.

pub mod commands;
pub mod logging;
pub mod score_file;

pub use score_file::ScoreFile;
