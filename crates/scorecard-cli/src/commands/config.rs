use scorecard_core::config::builtin;
use scorecard_core::config::load_config;
use scorecard_core::error::ScorecardError;
use scorecard_core::model::MetricField;
use std::path::Path;

pub fn list() -> Result<(), ScorecardError> {
    println!("Available predefined configs:\n");
    for name in builtin::PRESETS {
        let config = builtin::load_preset(name)?;
        println!("  {:<10} {} (v{})", name, config.name, config.version);
        if let Some(ref desc) = config.description {
            println!("             {desc}");
        }
        let ids: Vec<&str> = config.locations.iter().map(|l| l.id.as_str()).collect();
        println!("             locations: {}", ids.join(", "));
        println!();
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ScorecardError> {
    let config = load_config(file)?;
    println!(
        "OK: '{}' (v{}) with {} location(s)",
        config.name,
        config.version,
        config.locations.len()
    );
    Ok(())
}

pub fn schema() -> Result<(), ScorecardError> {
    println!("Extraction config format (JSON):\n");
    println!("  name                dealer group name as printed on the PDF");
    println!("  description         optional free text");
    println!("  version             config version string");
    println!("  locations           canonical location list; extraction output follows this order");
    println!("    id                stable identifier used on the command line and in JSON output");
    println!("    name              location name exactly as printed in the document");
    println!("  metricsAnchor       heading that starts the dealer metrics table");
    println!("  metricsTerminators  headings that end the metrics table (optional)");
    println!("  campaignAnchor      heading that starts the campaign completion table");
    println!("  campaignTerminators headings that end the campaign table (optional)");
    println!("  lowerIsBetter       metric keys where a lower value is the better one (optional)");
    println!();
    println!("Metric keys:");
    for field in MetricField::ALL {
        println!("  {:<24} {}", field.key(), field.label());
    }
    println!();
    println!("Example:\n");
    let example = r#"{
  "name": "Wichita Kenworth",
  "version": "1.0",
  "locations": [
    { "id": "wichita", "name": "Wichita Kenworth" },
    { "id": "dodge-city", "name": "Dodge City Kenworth" }
  ],
  "metricsAnchor": "Dealer Metrics",
  "metricsTerminators": ["Campaign Completion"],
  "campaignAnchor": "Campaign Completion",
  "lowerIsBetter": ["smMonthlyDwellAvgDays", "rdsYtdDwellAvgDays"]
}"#;
    println!("{example}");
    Ok(())
}
