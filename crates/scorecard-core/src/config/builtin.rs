use crate::config::{validate_config, ExtractionConfig};
use crate::error::ScorecardError;

const WICHITA_KENWORTH_JSON: &str = include_str!("../../../../config/wichita-kenworth.json");

/// Available predefined extraction configs.
pub const PRESETS: &[&str] = &["wichita"];

/// Load a predefined extraction config by name.
pub fn load_preset(name: &str) -> Result<ExtractionConfig, ScorecardError> {
    match name {
        "wichita" => {
            let config: ExtractionConfig = serde_json::from_str(WICHITA_KENWORTH_JSON)?;
            validate_config(&config)?;
            Ok(config)
        }
        _ => Err(ScorecardError::ConfigInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricField;

    #[test]
    fn test_load_wichita_preset() {
        let config = load_preset("wichita").unwrap();
        assert_eq!(config.locations.len(), 4);
        assert_eq!(config.locations[0].id, "wichita");
        assert_eq!(config.metrics_anchor, "Dealer Metrics");
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }

    #[test]
    fn test_dwell_metrics_are_lower_is_better() {
        let config = load_preset("wichita").unwrap();
        assert!(!config.higher_is_better(MetricField::SmMonthlyDwellAvgDays));
        assert!(!config.higher_is_better(MetricField::RdsYtdDwellAvgDays));
        assert!(config.higher_is_better(MetricField::TtActivation));
    }
}
