use crate::model::{LocationMetricRecord, MetricField, MetricsSnapshot, TrendDataPoint};
use serde::{Deserialize, Serialize};

/// One entry of an upload history: a snapshot tagged with its reporting
/// period. The snapshot store itself keeps only the latest snapshot, so
/// multi-month series must come from a history like this, maintained by the
/// upload log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSnapshot {
    pub month: u32,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    pub snapshot: MetricsSnapshot,
}

/// Numeric value of a metric field, if present: `%` is stripped, `N/A` and
/// unparseable values are absent.
pub fn metric_value(record: &LocationMetricRecord, field: MetricField) -> Option<f64> {
    let raw = record.value(field).trim();
    if raw.eq_ignore_ascii_case("n/a") {
        return None;
    }
    let numeric = raw.strip_suffix('%').unwrap_or(raw);
    numeric.trim().parse::<f64>().ok()
}

/// Build the sorted observation series for one (location, metric) pair.
/// Periods without that location, or with an N/A value, are simply absent.
pub fn build_series(
    history: &[StoredSnapshot],
    location_id: &str,
    field: MetricField,
) -> Vec<TrendDataPoint> {
    let mut points: Vec<TrendDataPoint> = history
        .iter()
        .filter_map(|stored| {
            let record = stored
                .snapshot
                .locations
                .iter()
                .find(|r| r.location_id.eq_ignore_ascii_case(location_id))?;
            let value = metric_value(record, field)?;
            Some(TrendDataPoint {
                month: stored.month,
                year: stored.year,
                value,
                upload_date: stored.upload_date.clone(),
            })
        })
        .collect();

    points.sort_by_key(|p| (p.year, p.month));
    points
}
