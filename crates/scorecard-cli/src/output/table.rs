use scorecard_core::model::{MetricField, MetricsSnapshot, TrendDataPoint, WarningSeverity};
use scorecard_core::trend::{ComparisonView, TrendAnalysis};
use std::fmt::Write;

const LABEL_WIDTH: usize = 28;

pub fn format_snapshot(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();

    if let Some(ref name) = snapshot.dealership.dealer_name {
        let _ = writeln!(out, "Dealer:   {name}");
    }
    if let Some(ref period) = snapshot.dealership.report_period {
        let _ = writeln!(out, "Period:   {period}");
    }
    if let Some(ref district) = snapshot.dealership.district {
        let _ = writeln!(out, "District: {district}");
    }
    let _ = writeln!(out, "Extracted: {}", snapshot.extracted_at.to_rfc3339());

    if let Some(ref error) = snapshot.error {
        let _ = writeln!(out, "\nExtraction failed: {error}");
    }

    for record in &snapshot.locations {
        let _ = writeln!(out, "\n=== {} ===\n", record.name);
        for field in MetricField::ALL {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                field.label(),
                record.value(field),
                width = LABEL_WIDTH
            );
        }
    }

    let campaigns = &snapshot.campaigns;
    if campaigns.total_campaigns > 0 {
        let _ = writeln!(out, "\n=== Campaign Completion ===\n");
        let _ = writeln!(
            out,
            "  {} campaign(s) across {} location(s), {} at goal",
            campaigns.total_campaigns, campaigns.total_locations, campaigns.at_goal
        );
        if let Some(rate) = campaigns.overall_close_rate {
            let _ = writeln!(out, "  Overall close rate: {rate}%");
        }
        if let Some(ref top) = campaigns.top_location {
            let _ = writeln!(out, "  Top location:    {top}");
        }
        if let Some(ref bottom) = campaigns.bottom_location {
            let _ = writeln!(out, "  Bottom location: {bottom}");
        }
        for location in &campaigns.locations {
            let _ = writeln!(out, "\n  {}", location.location_name);
            for c in &location.campaigns {
                let _ = writeln!(
                    out,
                    "    {:<8} {}  close {}  national {}  goal {}",
                    c.code, c.name, c.close_rate, c.national_rate, c.goal
                );
            }
        }
    }

    if !snapshot.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for w in &snapshot.warnings {
            let severity = match w.severity {
                WarningSeverity::Critical => "critical",
                WarningSeverity::Important => "important",
                WarningSeverity::Info => "info",
            };
            match &w.location {
                Some(location) => {
                    let _ = writeln!(out, "  [{severity}] {location}: {}", w.message);
                }
                None => {
                    let _ = writeln!(out, "  [{severity}] {}", w.message);
                }
            }
        }
    }

    out
}

pub fn format_trend(
    location: &str,
    metric: MetricField,
    points: &[TrendDataPoint],
    analysis: &TrendAnalysis,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} at {} ===\n", metric.label(), location);

    if analysis.insufficient_data {
        let _ = writeln!(
            out,
            "  Insufficient data: {} data point(s), need at least 2",
            points.len()
        );
    }

    for p in points {
        let _ = writeln!(out, "  {:>4}-{:02}  {}", p.year, p.month, p.value);
    }

    if !analysis.insufficient_data {
        let _ = writeln!(out, "\n  Trend:       {}", analysis.trend);
        let _ = writeln!(out, "  Slope:       {:+.3}", analysis.trend_direction);
        let _ = writeln!(out, "  R-squared:   {:.3}", analysis.r_squared);
        let stats = &analysis.analysis;
        let _ = writeln!(out, "  Avg change:  {:+.3}", stats.average_change);
        let _ = writeln!(out, "  Volatility:  {:.3}", stats.volatility);
        let _ = writeln!(
            out,
            "  Vs previous: {:+.1}%",
            stats.current_vs_previous * 100.0
        );
        if let Some(ref best) = stats.best_month {
            let _ = writeln!(
                out,
                "  Highest:     {} ({}-{:02})",
                best.value, best.year, best.month
            );
        }
        if let Some(ref worst) = stats.worst_month {
            let _ = writeln!(
                out,
                "  Lowest:      {} ({}-{:02})",
                worst.value, worst.year, worst.month
            );
        }
    }

    out
}

pub fn format_comparison(view: &ComparisonView) -> String {
    let mut out = String::new();

    for (i, comparison) in view.metrics.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let polarity = if comparison.higher_is_better {
            "higher is better"
        } else {
            "lower is better"
        };
        let _ = writeln!(out, "=== {} ({polarity}) ===\n", comparison.label);

        let name_width = comparison
            .locations
            .iter()
            .map(|l| l.location_name.len())
            .max()
            .unwrap_or(10);

        for location in &comparison.locations {
            let latest = match location.latest {
                Some(v) => format!("{v}"),
                None => "-".to_string(),
            };
            let trend = if location.analysis.insufficient_data {
                "insufficient data".to_string()
            } else {
                format!(
                    "{} (slope {:+.3})",
                    location.analysis.trend, location.analysis.trend_direction
                )
            };
            let _ = writeln!(
                out,
                "  {:<width$}  latest {:>8}  {}",
                location.location_name,
                latest,
                trend,
                width = name_width
            );
        }
    }

    out
}
