pub mod compare;
pub mod config;
pub mod extract;
pub mod trend;

use scorecard_core::config::builtin::load_preset;
use scorecard_core::config::{load_config, ExtractionConfig};
use scorecard_core::error::ScorecardError;
use std::path::PathBuf;

/// Resolve the extraction config: a custom file wins over the preset.
pub fn resolve_config(
    config_file: Option<PathBuf>,
    preset: &str,
) -> Result<ExtractionConfig, ScorecardError> {
    match config_file {
        Some(path) => load_config(&path),
        None => load_preset(preset),
    }
}
