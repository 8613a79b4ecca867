pub mod builtin;

use crate::error::ScorecardError;
use crate::model::MetricField;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A dealership location the extractor should look for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDef {
    pub id: String,
    pub name: String,
}

/// Immutable extraction configuration: the known location names (in canonical
/// order), the section anchor phrases, and per-metric polarity.
///
/// Passed explicitly into every extractor call; never global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Canonical location order. Windowing and output ordering follow it.
    pub locations: Vec<LocationDef>,
    /// Anchor phrase for the dealer metrics table.
    pub metrics_anchor: String,
    /// Phrases that end the metrics section (e.g. the campaign header).
    #[serde(default)]
    pub metrics_terminators: Vec<String>,
    /// Anchor phrase for the campaign completion table.
    pub campaign_anchor: String,
    #[serde(default)]
    pub campaign_terminators: Vec<String>,
    /// Metric fields where a lower value is the better one (dwell days,
    /// triage hours). A product decision supplied by configuration; the
    /// trend engine itself never applies polarity.
    #[serde(default)]
    pub lower_is_better: Vec<MetricField>,
}

impl ExtractionConfig {
    pub fn higher_is_better(&self, field: MetricField) -> bool {
        !self.lower_is_better.contains(&field)
    }

    pub fn location_by_id(&self, id: &str) -> Option<&LocationDef> {
        self.locations.iter().find(|l| l.id.eq_ignore_ascii_case(id))
    }
}

/// Load an extraction config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, ScorecardError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScorecardError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractionConfig =
        serde_json::from_str(&content).map_err(|e| ScorecardError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractionConfig, ScorecardError> {
    let config: ExtractionConfig = serde_json::from_str(json).map_err(ScorecardError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is well-formed.
pub fn validate_config(config: &ExtractionConfig) -> Result<(), ScorecardError> {
    if config.locations.is_empty() {
        return Err(ScorecardError::ConfigInvalid(
            "locations must not be empty".into(),
        ));
    }

    for loc in &config.locations {
        if loc.id.trim().is_empty() {
            return Err(ScorecardError::ConfigInvalid(
                "location id must not be empty".into(),
            ));
        }
        if loc.name.trim().is_empty() {
            return Err(ScorecardError::ConfigInvalid(format!(
                "location '{}' has an empty name",
                loc.id
            )));
        }
    }

    for (i, a) in config.locations.iter().enumerate() {
        for b in &config.locations[i + 1..] {
            if a.id.eq_ignore_ascii_case(&b.id) {
                return Err(ScorecardError::ConfigInvalid(format!(
                    "duplicate location id '{}'",
                    a.id
                )));
            }
            if a.name.eq_ignore_ascii_case(&b.name) {
                return Err(ScorecardError::ConfigInvalid(format!(
                    "duplicate location name '{}'",
                    a.name
                )));
            }
        }
    }

    if config.metrics_anchor.trim().is_empty() {
        return Err(ScorecardError::ConfigInvalid(
            "metricsAnchor must not be empty".into(),
        ));
    }
    if config.campaign_anchor.trim().is_empty() {
        return Err(ScorecardError::ConfigInvalid(
            "campaignAnchor must not be empty".into(),
        ));
    }

    Ok(())
}
