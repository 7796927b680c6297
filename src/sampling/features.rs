//! Peak, valley and inflection point detection

use super::FeatureSet;
use crate::constants::features::TREND_SPAN;

/// Scan `values` once and report local peaks, valleys and inflection points
///
/// A peak at `i` rises above both neighbors and equals the maximum of
/// `values[i - window..=i + window]`; valleys mirror that with the minimum.
/// Only positions in `[window, n - window)` are considered for either.
///
/// An inflection point is a position where the trend over the previous two
/// samples and the trend over the next two have opposite signs, with both
/// magnitudes above `epsilon`.
pub fn detect_features(values: &[f64], window: usize, epsilon: f64) -> FeatureSet {
    profiling::scope!("detect_features");

    let n = values.len();
    let w = window.max(1);
    let mut features = FeatureSet::default();

    if n > w.saturating_mul(2) {
        for i in w..n - w {
            let v = values[i];
            let neighborhood = &values[i - w..=i + w];

            if v > values[i - 1] && v > values[i + 1] {
                let max = neighborhood.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if v == max {
                    features.peaks.push(i);
                }
            }

            if v < values[i - 1] && v < values[i + 1] {
                let min = neighborhood.iter().copied().fold(f64::INFINITY, f64::min);
                if v == min {
                    features.valleys.push(i);
                }
            }
        }
    }

    if n > TREND_SPAN.saturating_mul(2) {
        for i in TREND_SPAN..n - TREND_SPAN {
            let trend_before = values[i] - values[i - TREND_SPAN];
            let trend_after = values[i + TREND_SPAN] - values[i];

            if trend_before.abs() > epsilon
                && trend_after.abs() > epsilon
                && (trend_before > 0.0) != (trend_after > 0.0)
            {
                features.inflection_points.push(i);
            }
        }
    }

    features
}
