use crate::config::ExtractionConfig;
use crate::extraction::campaigns::extract_campaigns;
use crate::extraction::dealership::extract_dealership;
use crate::extraction::lines::{assemble_lines, TextLine};
use crate::extraction::locations::extract_location_records;
use crate::extraction::sections::{locate_section, section_lines};
use crate::extraction::PageContent;
use crate::model::{
    CampaignAggregate, ExtractionWarning, MetricsSnapshot, WarningSeverity,
};
use chrono::{DateTime, Utc};

/// Build a snapshot from extracted pages, stamped with the current time.
pub fn build_snapshot(pages: &[PageContent], config: &ExtractionConfig) -> MetricsSnapshot {
    build_snapshot_at(pages, config, Utc::now())
}

/// Build a snapshot with an explicit timestamp.
///
/// Apart from the stamp this is a pure function of its input: re-running on
/// identical pages yields an identical snapshot. Never fails; a document
/// that yields no location records produces a shell carrying the raw text
/// and an error marker instead.
pub fn build_snapshot_at(
    pages: &[PageContent],
    config: &ExtractionConfig,
    extracted_at: DateTime<Utc>,
) -> MetricsSnapshot {
    let lines: Vec<TextLine> = pages
        .iter()
        .flat_map(|p| assemble_lines(&p.fragments))
        .collect();

    let mut warnings: Vec<ExtractionWarning> = Vec::new();

    let dealership = extract_dealership(&lines, config);

    // Metrics table. When the anchor is missing the whole document is
    // scanned instead: location-name windows are self-anchoring, and real
    // documents vary in header wording.
    let metric_range: &[TextLine] = match locate_section(
        &lines,
        &config.metrics_anchor,
        &config.metrics_terminators,
    ) {
        Some(section) => section_lines(&lines, &section),
        None => {
            log::debug!("metrics anchor '{}' not found", config.metrics_anchor);
            warnings.push(ExtractionWarning {
                location: None,
                message: format!(
                    "section '{}' not found; scanning full document",
                    config.metrics_anchor
                ),
                severity: WarningSeverity::Info,
            });
            &lines
        }
    };
    let extraction = extract_location_records(metric_range, config);
    warnings.extend(extraction.warnings);

    // Campaign table. Missing section means no campaign data this month;
    // that is supplementary, never an error.
    let campaigns: CampaignAggregate = match locate_section(
        &lines,
        &config.campaign_anchor,
        &config.campaign_terminators,
    ) {
        Some(section) => extract_campaigns(section_lines(&lines, &section), config),
        None => {
            warnings.push(ExtractionWarning {
                location: None,
                message: format!("section '{}' not found", config.campaign_anchor),
                severity: WarningSeverity::Info,
            });
            CampaignAggregate::default()
        }
    };

    let mut snapshot = MetricsSnapshot {
        dealership,
        locations: extraction.records,
        campaigns,
        extracted_at,
        warnings,
        error: None,
        raw_text: None,
    };

    if snapshot.locations.is_empty() {
        snapshot.error = Some("no location records extracted".to_string());
        let raw: Vec<String> = lines.iter().map(|l| l.text()).collect();
        snapshot.raw_text = Some(raw.join("\n"));
        snapshot.warnings.push(ExtractionWarning {
            location: None,
            message: "document yielded no location records".to_string(),
            severity: WarningSeverity::Critical,
        });
    }

    log::info!(
        "extracted {} location record(s), {} campaign(s), {} warning(s)",
        snapshot.locations.len(),
        snapshot.campaigns.total_campaigns,
        snapshot.warnings.len()
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin::load_preset;
    use crate::extraction::PositionedFragment;
    use chrono::TimeZone;

    fn page_from_lines(texts: &[&str]) -> PageContent {
        let fragments = texts
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                let y = 1000.0 - i as f32 * 12.0;
                line.split_whitespace()
                    .enumerate()
                    .map(move |(j, word)| PositionedFragment::new(word, j as f32 * 40.0, y))
                    .collect::<Vec<_>>()
            })
            .collect();
        PageContent {
            page_number: 1,
            fragments,
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_full_document_snapshot() {
        let config = load_preset("wichita").unwrap();
        let page = page_from_lines(&[
            "Wichita Kenworth Service Scorecard",
            "Report Period: June 2025",
            "Dealer Metrics",
            "Wichita Kenworth",
            "96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6",
            "Dodge City Kenworth",
            "88% 90% 95% 2.1 1.5 80.0% 1.2 1.0% 9.0% 4.8 4.6",
            "Campaign Completion",
            "Wichita Kenworth",
            "24KWL Bendix EC80 ABS ECU Incorrect Signal Processing 59% 56% 100%",
        ]);

        let snapshot = build_snapshot_at(&[page], &config, stamp());

        assert!(snapshot.error.is_none());
        assert!(snapshot.raw_text.is_none());
        assert_eq!(snapshot.locations.len(), 2);
        assert_eq!(snapshot.locations[0].vsc_case_requirements, "96%");
        assert_eq!(snapshot.dealership.report_period.as_deref(), Some("June 2025"));
        assert_eq!(snapshot.campaigns.total_campaigns, 1);
        assert_eq!(snapshot.campaigns.locations[0].campaigns[0].code, "24KWL");
    }

    #[test]
    fn test_metrics_stop_at_campaign_terminator() {
        // Wichita appears only in the campaign section; the metrics pass
        // must not pick up campaign percentages as metric values.
        let config = load_preset("wichita").unwrap();
        let page = page_from_lines(&[
            "Dealer Metrics",
            "Dodge City Kenworth",
            "88% 90% 95% 2.1 1.5 80.0% 1.2 1.0% 9.0% 4.8 4.6",
            "Campaign Completion",
            "Wichita Kenworth",
            "24KWL Bendix Recall 59% 56% 100%",
            "25KWB Fuel Line Check 72% 70% 100%",
            "26KWA Wiring Harness 81% 75% 100%",
            "27KWC Steering Column 90% 85% 100%",
        ]);

        let snapshot = build_snapshot_at(&[page], &config, stamp());
        assert_eq!(snapshot.locations.len(), 1);
        assert_eq!(snapshot.locations[0].location_id, "dodge-city");
    }

    #[test]
    fn test_missing_campaign_section_is_empty_aggregate() {
        let config = load_preset("wichita").unwrap();
        let page = page_from_lines(&[
            "Dealer Metrics",
            "Wichita Kenworth",
            "96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6",
        ]);

        let snapshot = build_snapshot_at(&[page], &config, stamp());
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.campaigns.total_campaigns, 0);
        assert!(snapshot
            .warnings
            .iter()
            .any(|w| w.message.contains("Campaign Completion")));
    }

    #[test]
    fn test_empty_document_returns_shell() {
        let config = load_preset("wichita").unwrap();
        let page = page_from_lines(&["nothing resembling a scorecard here"]);

        let snapshot = build_snapshot_at(&[page], &config, stamp());
        assert!(snapshot.locations.is_empty());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("no location records extracted")
        );
        assert!(snapshot
            .raw_text
            .as_deref()
            .unwrap()
            .contains("nothing resembling"));
        assert!(snapshot
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Critical));
    }

    #[test]
    fn test_snapshot_deterministic_apart_from_stamp() {
        let config = load_preset("wichita").unwrap();
        let page = page_from_lines(&[
            "Dealer Metrics",
            "Wichita Kenworth",
            "96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6",
        ]);

        let a = build_snapshot_at(&[page.clone()], &config, stamp());
        let b = build_snapshot_at(&[page], &config, stamp());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
