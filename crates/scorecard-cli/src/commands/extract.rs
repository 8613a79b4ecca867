use scorecard_core::error::ScorecardError;
use scorecard_core::extraction::pdftotext::PdftotextExtractor;
use scorecard_core::store::{JsonFileStore, SnapshotStore};
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    config_file: Option<PathBuf>,
    preset: &str,
    output_format: &str,
    output_file: Option<PathBuf>,
    store_file: Option<PathBuf>,
) -> Result<(), ScorecardError> {
    let config = super::resolve_config(config_file, preset)?;

    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let snapshot = scorecard_core::extract_snapshot(&pdf_bytes, &extractor, &config)?;

    if let Some(path) = store_file {
        let store = JsonFileStore::new(&path);
        store.replace_current(&snapshot)?;
        eprintln!("Snapshot stored in {}", path.display());
    }

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&snapshot)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} location record(s), written to {}",
                snapshot.locations.len(),
                path.display()
            );
            for w in &snapshot.warnings {
                eprintln!("  warning: {}", w.message);
            }
        }
        None => match output_format {
            "json" => output::json::print(&snapshot)?,
            _ => print!("{}", output::table::format_snapshot(&snapshot)),
        },
    }

    Ok(())
}
