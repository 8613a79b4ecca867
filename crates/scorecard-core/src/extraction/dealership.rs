use crate::config::ExtractionConfig;
use crate::extraction::lines::TextLine;
use crate::model::DealershipMetrics;

/// Pull best-effort dealership-level summary fields from free text.
///
/// Independent of the tabular extractors: label matches anywhere in the
/// document, first match wins, everything optional.
pub fn extract_dealership(lines: &[TextLine], config: &ExtractionConfig) -> DealershipMetrics {
    let mut metrics = DealershipMetrics::default();

    for line in lines {
        let text = line.text();

        if metrics.dealer_name.is_none() && line.contains_ci(&config.name) {
            metrics.dealer_name = Some(config.name.clone());
        }

        if metrics.report_period.is_none() {
            if let Some(value) = extract_after_label(&text, "report period") {
                metrics.report_period = Some(value);
            } else if let Some(value) = extract_after_label(&text, "reporting period") {
                metrics.report_period = Some(value);
            }
        }

        if metrics.district.is_none() {
            if let Some(value) = extract_after_label(&text, "district") {
                metrics.district = Some(value);
            }
        }
    }

    metrics
}

/// Extract a value appearing after a label (ASCII case-insensitive).
/// Handles "Label: value" and "Label value"; returns the rest of the line.
fn extract_after_label(text: &str, label: &str) -> Option<String> {
    let idx = find_ascii_ci(text, label)?;
    let after = &text[idx + label.len()..];
    let value = after
        .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
        .trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
/// Matching stays on the original bytes, so the returned offset and the
/// matched span are char boundaries even when the surrounding text is
/// multi-byte.
fn find_ascii_ci(text: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    text.as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
