use scorecard_core::error::ScorecardError;
use scorecard_core::model::MetricField;
use scorecard_core::trend::comparison::build_comparison;
use scorecard_core::trend::series::StoredSnapshot;
use std::path::PathBuf;

use crate::output;

pub fn run(
    history_file: PathBuf,
    config_file: Option<PathBuf>,
    preset: &str,
    metrics: Vec<String>,
    output_format: &str,
) -> Result<(), ScorecardError> {
    let config = super::resolve_config(config_file, preset)?;

    let fields: Vec<MetricField> = if metrics.is_empty() {
        MetricField::ALL.to_vec()
    } else {
        metrics
            .iter()
            .map(|key| {
                MetricField::from_key_loose(key)
                    .ok_or_else(|| ScorecardError::UnknownMetric(key.clone()))
            })
            .collect::<Result<_, _>>()?
    };

    let content = std::fs::read(&history_file)?;
    let history: Vec<StoredSnapshot> = serde_json::from_slice(&content)?;

    let view = build_comparison(&history, &config, &fields);

    match output_format {
        "json" => output::json::print(&view)?,
        _ => print!("{}", output::table::format_comparison(&view)),
    }

    Ok(())
}
