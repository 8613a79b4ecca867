use scorecard_core::error::ScorecardError;
use scorecard_core::model::{MetricField, TrendDataPoint};
use scorecard_core::trend::engine::analyze;
use scorecard_core::trend::series::{build_series, StoredSnapshot};
use scorecard_core::trend::TrendAnalysis;
use serde::Serialize;
use std::path::PathBuf;

use crate::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendReport {
    location_id: String,
    location_name: String,
    metric: MetricField,
    label: String,
    points: Vec<TrendDataPoint>,
    analysis: TrendAnalysis,
}

pub fn run(
    history_file: PathBuf,
    config_file: Option<PathBuf>,
    preset: &str,
    location: &str,
    metric: &str,
    output_format: &str,
) -> Result<(), ScorecardError> {
    let config = super::resolve_config(config_file, preset)?;
    let location = config
        .location_by_id(location)
        .ok_or_else(|| ScorecardError::UnknownLocation(location.to_string()))?;

    let field = MetricField::from_key_loose(metric)
        .ok_or_else(|| ScorecardError::UnknownMetric(metric.to_string()))?;

    let content = std::fs::read(&history_file)?;
    let history: Vec<StoredSnapshot> = serde_json::from_slice(&content)?;

    let points = build_series(&history, &location.id, field);
    let analysis = analyze(&points);

    match output_format {
        "json" => output::json::print(&TrendReport {
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            metric: field,
            label: field.label().to_string(),
            points,
            analysis,
        })?,
        _ => print!(
            "{}",
            output::table::format_trend(&location.name, field, &points, &analysis)
        ),
    }

    Ok(())
}
