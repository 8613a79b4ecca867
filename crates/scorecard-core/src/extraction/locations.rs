use crate::config::{ExtractionConfig, LocationDef};
use crate::extraction::lines::TextLine;
use crate::model::{ExtractionWarning, LocationMetricRecord, WarningSeverity};
use crate::parsing::tokenize;

/// A location record needs exactly this many metric values. Fewer means the
/// location is skipped for the pass; a partial record would silently corrupt
/// downstream averages.
pub const METRICS_PER_LOCATION: usize = 11;

/// The contiguous line range `[start, end)` attributed to one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationWindow<'a> {
    pub location: &'a LocationDef,
    pub start: usize,
    pub end: usize,
}

/// Partition section lines into non-overlapping per-location windows.
///
/// Greedy interval partitioning over the line sequence: each location's
/// window opens at the first line containing its name (case-insensitive) and
/// closes where the nearest other location's window opens. Matching proceeds
/// in canonical config order, and a line already claimed as another
/// location's start cannot be claimed again, so partial name collisions
/// resolve in favor of the earlier canonical location.
pub fn partition_windows<'a>(
    lines: &[TextLine],
    locations: &'a [LocationDef],
) -> Vec<LocationWindow<'a>> {
    let mut starts: Vec<(usize, &LocationDef)> = Vec::new();

    for location in locations {
        let found = lines.iter().enumerate().position(|(idx, line)| {
            line.contains_ci(&location.name) && !starts.iter().any(|(s, _)| *s == idx)
        });
        if let Some(idx) = found {
            starts.push((idx, location));
        }
    }

    // Windows close at the nearest later start, regardless of canonical order.
    let mut windows: Vec<LocationWindow<'a>> = starts
        .iter()
        .map(|&(start, location)| {
            let end = starts
                .iter()
                .map(|&(s, _)| s)
                .filter(|&s| s > start)
                .min()
                .unwrap_or(lines.len());
            LocationWindow {
                location,
                start,
                end,
            }
        })
        .collect();

    windows.sort_by_key(|w| w.start);
    windows
}

/// Records plus recoverable skips from one extraction pass.
#[derive(Debug, Default)]
pub struct LocationExtraction {
    pub records: Vec<LocationMetricRecord>,
    pub warnings: Vec<ExtractionWarning>,
}

/// Extract one metric record per configured location from section lines.
///
/// Per window, every metric-value token (percentage, decimal, or N/A) is
/// collected in reading order; the first eleven become the record. Windows
/// with fewer than eleven values produce a warning and no record; a skip is
/// distinguishable from a present-but-empty record so the caller can fall
/// back to previously known values. Output records follow canonical config
/// order.
pub fn extract_location_records(
    lines: &[TextLine],
    config: &ExtractionConfig,
) -> LocationExtraction {
    let windows = partition_windows(lines, &config.locations);
    let mut out = LocationExtraction::default();

    for location in &config.locations {
        let Some(window) = windows.iter().find(|w| w.location.id == location.id) else {
            out.warnings.push(ExtractionWarning {
                location: Some(location.name.clone()),
                message: format!("location '{}' not found in metrics section", location.name),
                severity: WarningSeverity::Important,
            });
            continue;
        };

        let values: Vec<String> = lines[window.start..window.end]
            .iter()
            .flat_map(|line| tokenize(&line.text()))
            .filter(|t| t.is_metric_value())
            .map(|t| t.raw().to_string())
            .collect();

        if values.len() < METRICS_PER_LOCATION {
            log::debug!(
                "skipping {}: {} of {} metric values found",
                location.name,
                values.len(),
                METRICS_PER_LOCATION
            );
            out.warnings.push(ExtractionWarning {
                location: Some(location.name.clone()),
                message: format!(
                    "skipped '{}': found {} of {} metric values",
                    location.name,
                    values.len(),
                    METRICS_PER_LOCATION
                ),
                severity: WarningSeverity::Important,
            });
            continue;
        }

        let mut first_eleven = values;
        first_eleven.truncate(METRICS_PER_LOCATION);
        let Ok(values_arr) = <[String; METRICS_PER_LOCATION]>::try_from(first_eleven) else {
            continue;
        };
        out.records.push(LocationMetricRecord::from_values(
            &location.name,
            &location.id,
            values_arr,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin::load_preset;
    use crate::extraction::PositionedFragment;

    fn make_lines(texts: &[&str]) -> Vec<TextLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| TextLine {
                y: 1000.0 - i as f32 * 10.0,
                fragments: vec![PositionedFragment::new(*t, 0.0, 1000.0 - i as f32 * 10.0)],
            })
            .collect()
    }

    fn config() -> ExtractionConfig {
        load_preset("wichita").unwrap()
    }

    #[test]
    fn test_windows_are_non_overlapping_and_ordered() {
        let lines = make_lines(&[
            "Wichita Kenworth",
            "96% 92% 99%",
            "Dodge City Kenworth",
            "88% 90% 95%",
            "Liberal Kenworth",
            "80%",
        ]);
        let config = config();
        let windows = partition_windows(&lines, &config.locations);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].location.id, "wichita");
        assert_eq!((windows[0].start, windows[0].end), (0, 2));
        assert_eq!((windows[1].start, windows[1].end), (2, 4));
        assert_eq!((windows[2].start, windows[2].end), (4, 6));
    }

    #[test]
    fn test_windows_follow_document_order_not_config_order() {
        let lines = make_lines(&[
            "Liberal Kenworth",
            "80% 81%",
            "Wichita Kenworth",
            "96% 92%",
        ]);
        let config = config();
        let windows = partition_windows(&lines, &config.locations);
        assert_eq!(windows[0].location.id, "liberal");
        assert_eq!((windows[0].start, windows[0].end), (0, 2));
        assert_eq!(windows[1].location.id, "wichita");
        assert_eq!((windows[1].start, windows[1].end), (2, 4));
    }

    #[test]
    fn test_colliding_line_claimed_by_earlier_canonical_location() {
        // Both names would match the same line; canonical order wins the
        // claim and the later location matches its own line further down.
        let lines = make_lines(&["Wichita Kenworth and Dodge City Kenworth review", "Dodge City Kenworth", "88%"]);
        let config = config();
        let windows = partition_windows(&lines, &config.locations);
        assert_eq!(windows[0].location.id, "wichita");
        assert_eq!(windows[0].start, 0);
        assert_eq!(windows[1].location.id, "dodge-city");
        assert_eq!(windows[1].start, 1);
    }

    #[test]
    fn test_complete_row_extracted() {
        let lines = make_lines(&[
            "Wichita Kenworth",
            "96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6",
        ]);
        let result = extract_location_records(&lines, &config());
        assert_eq!(result.records.len(), 1);
        let r = &result.records[0];
        assert_eq!(r.location_id, "wichita");
        assert_eq!(r.vsc_case_requirements, "96%");
        assert_eq!(r.tt_activation, "99%");
        assert_eq!(r.rds_ytd_dwell_avg_days, "5.6");
    }

    #[test]
    fn test_values_spanning_lines_collected_in_order() {
        let lines = make_lines(&[
            "Dodge City Kenworth",
            "96% 92% 99% 2.7 1.9 87.9%",
            "1.8 1.3% 10.1% 5.8 5.6",
        ]);
        let result = extract_location_records(&lines, &config());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].sm_triage_under_4_pct, "87.9%");
        assert_eq!(result.records[0].etr_monthly_avg_days, "1.8");
    }

    #[test]
    fn test_na_placeholder_preserved() {
        let lines = make_lines(&[
            "Emporia Kenworth",
            "96% N/A 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6",
        ]);
        let result = extract_location_records(&lines, &config());
        assert_eq!(result.records[0].vsc_closed_correctly, "N/A");
    }

    #[test]
    fn test_short_window_skipped_not_padded() {
        // Fewer than 11 qualifying tokens -> no record at all.
        let lines = make_lines(&["Wichita Kenworth", "96% 92% 99%"]);
        let result = extract_location_records(&lines, &config());
        assert!(result.records.is_empty());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("3 of 11")));
    }

    #[test]
    fn test_extra_tokens_beyond_eleven_ignored() {
        let lines = make_lines(&[
            "Liberal Kenworth",
            "96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6 77% 3.2",
        ]);
        let result = extract_location_records(&lines, &config());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].rds_ytd_dwell_avg_days, "5.6");
    }

    #[test]
    fn test_tokens_not_attributed_across_windows() {
        // Wichita's window ends where Dodge City's begins; Wichita has too
        // few values and must not steal Dodge City's.
        let lines = make_lines(&[
            "Wichita Kenworth",
            "96% 92%",
            "Dodge City Kenworth",
            "88% 90% 95% 2.1 1.5 80.0% 1.2 1.0% 9.0% 4.8 4.6",
        ]);
        let result = extract_location_records(&lines, &config());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].location_id, "dodge-city");
        assert_eq!(result.records[0].vsc_case_requirements, "88%");
    }

    #[test]
    fn test_missing_location_warned() {
        let lines = make_lines(&[
            "Wichita Kenworth",
            "96% 92% 99% 2.7 1.9 87.9% 1.8 1.3% 10.1% 5.8 5.6",
        ]);
        let result = extract_location_records(&lines, &config());
        let missing: Vec<_> = result
            .warnings
            .iter()
            .filter(|w| w.message.contains("not found"))
            .collect();
        assert_eq!(missing.len(), 3);
    }
}
