//! CLI command implementations

pub mod check;
pub mod notes;
pub mod render;
