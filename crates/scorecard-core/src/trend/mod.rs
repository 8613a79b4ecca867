pub mod comparison;
pub mod engine;
pub mod series;

use crate::model::TrendDataPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend classification for one (location, metric) series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Supporting statistics for a trend classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendStats {
    /// Mean of consecutive period-over-period deltas.
    pub average_change: f64,
    /// Population standard deviation of the values.
    pub volatility: f64,
    /// Data point with the maximum raw value. Polarity is deliberately not
    /// applied here; see `MetricComparison::higher_is_better`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_month: Option<TrendDataPoint>,
    /// Data point with the minimum raw value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_month: Option<TrendDataPoint>,
    /// Relative change from the second-to-last to the last value
    /// (0 when the previous value is 0).
    pub current_vs_previous: f64,
}

/// The derived trend for one series. Computed fresh on every request;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub trend: Trend,
    /// Least-squares slope of value against observation index.
    pub trend_direction: f64,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    /// True when fewer than two points were available.
    pub insufficient_data: bool,
    pub analysis: TrendStats,
}

/// Trend for one location within a metric comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTrend {
    pub location_id: String,
    pub location_name: String,
    /// Most recent observed value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<f64>,
    pub analysis: TrendAnalysis,
}

/// All locations' trends for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub metric: crate::model::MetricField,
    pub label: String,
    /// Polarity from configuration: whether a larger value is the better
    /// one. Consumers use this to interpret best/worst and trend direction;
    /// the engine itself reports raw statistics only.
    pub higher_is_better: bool,
    pub locations: Vec<LocationTrend>,
}

/// Cross-sectional dashboard view: per metric, per location, a trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub metrics: Vec<MetricComparison>,
}
