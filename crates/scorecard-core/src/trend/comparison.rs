use crate::config::ExtractionConfig;
use crate::model::MetricField;
use crate::trend::engine::analyze;
use crate::trend::series::{build_series, StoredSnapshot};
use crate::trend::{ComparisonView, LocationTrend, MetricComparison};

/// Fan the trend engine across metrics × configured locations.
///
/// Output order is canonical regardless of input order: metrics in table
/// order, locations in config order. A pair with no data still appears,
/// carrying an insufficient-data analysis, so one empty series never
/// aborts the view.
pub fn build_comparison(
    history: &[StoredSnapshot],
    config: &ExtractionConfig,
    metrics: &[MetricField],
) -> ComparisonView {
    let selected: Vec<MetricField> = MetricField::ALL
        .iter()
        .copied()
        .filter(|f| metrics.contains(f))
        .collect();

    let metrics_out = selected
        .into_iter()
        .map(|metric| {
            let locations = config
                .locations
                .iter()
                .map(|location| {
                    let points = build_series(history, &location.id, metric);
                    LocationTrend {
                        location_id: location.id.clone(),
                        location_name: location.name.clone(),
                        latest: points.last().map(|p| p.value),
                        analysis: analyze(&points),
                    }
                })
                .collect();

            MetricComparison {
                metric,
                label: metric.label().to_string(),
                higher_is_better: config.higher_is_better(metric),
                locations,
            }
        })
        .collect();

    ComparisonView {
        metrics: metrics_out,
    }
}
