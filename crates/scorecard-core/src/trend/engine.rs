use crate::model::TrendDataPoint;
use crate::trend::{Trend, TrendAnalysis, TrendStats};

/// Slopes with absolute value below this classify as stable.
pub const SLOPE_THRESHOLD: f64 = 0.1;

/// Fits with R² below this classify as stable regardless of slope.
pub const R_SQUARED_THRESHOLD: f64 = 0.3;

/// Classify the trend of one (location, metric) series.
///
/// Points are ordered by (year, month) before any statistic is computed.
/// Ordinary least squares regresses value against the observation index
/// 0..n-1; calendar gaps between observations are not distance-weighted.
/// With fewer than two points the result is `stable` with
/// `insufficient_data` set and zeroed statistics.
pub fn analyze(points: &[TrendDataPoint]) -> TrendAnalysis {
    let mut points: Vec<TrendDataPoint> = points.to_vec();
    points.sort_by_key(|p| (p.year, p.month));

    if points.len() < 2 {
        return TrendAnalysis {
            trend: Trend::Stable,
            trend_direction: 0.0,
            r_squared: 0.0,
            insufficient_data: true,
            analysis: TrendStats {
                best_month: points.first().cloned(),
                worst_month: points.first().cloned(),
                ..TrendStats::default()
            },
        };
    }

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let (slope, r_squared) = least_squares(&values);

    let trend = if slope.abs() < SLOPE_THRESHOLD || r_squared < R_SQUARED_THRESHOLD {
        Trend::Stable
    } else if slope > 0.0 {
        Trend::Improving
    } else {
        Trend::Declining
    };

    let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let average_change = deltas.iter().sum::<f64>() / deltas.len() as f64;

    let previous = values[values.len() - 2];
    let current = values[values.len() - 1];
    let current_vs_previous = if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous
    };

    TrendAnalysis {
        trend,
        trend_direction: slope,
        r_squared,
        insufficient_data: false,
        analysis: TrendStats {
            average_change,
            volatility: population_std_dev(&values),
            best_month: extreme_point(&points, |a, b| a > b),
            worst_month: extreme_point(&points, |a, b| a < b),
            current_vs_previous,
        },
    }
}

/// OLS of y against x = 0..n-1. Returns (slope, R²). A constant series has
/// slope 0 and R² 1 (the fit is exact).
fn least_squares(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
        ss_tot += (y - mean_y) * (y - mean_y);
    }

    let slope = sxy / sxx;
    if ss_tot == 0.0 {
        return (slope, 1.0);
    }

    let intercept = mean_y - slope * mean_x;
    let ss_res: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let predicted = intercept + slope * i as f64;
            (y - predicted) * (y - predicted)
        })
        .sum();

    (slope, 1.0 - ss_res / ss_tot)
}

fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt()
}

/// Point with the extreme value; ties keep the earliest period.
fn extreme_point(
    points: &[TrendDataPoint],
    better: impl Fn(f64, f64) -> bool,
) -> Option<TrendDataPoint> {
    let mut result: Option<&TrendDataPoint> = None;
    for point in points {
        match result {
            Some(current) if !better(point.value, current.value) => {}
            _ => result = Some(point),
        }
    }
    result.cloned()
}
