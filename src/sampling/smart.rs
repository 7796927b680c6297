//! Feature-preserving sampling

use super::features::detect_features;
use super::selectors::{log_spaced_indices, top_variation_indices};
use super::{AppliedStrategy, FeatureSet, SamplingResult};
use crate::config::InflectionThreshold;
use crate::series::Observation;
use std::collections::BTreeSet;

/// Reduce `series` while keeping its peaks, valleys and inflection points
///
/// The endpoints and every detected feature are always kept, then the set
/// is topped up with log-spaced positions and finally the positions with
/// the highest local variation. `target_points` is a soft target: a series
/// with more features than the budget returns all of them, and collisions
/// between the fill sets can leave the result slightly short.
pub fn smart(series: &[Observation], target_points: usize, window: usize) -> SamplingResult {
    smart_with(
        series,
        target_points,
        window,
        InflectionThreshold::default(),
        true,
    )
}

pub(crate) fn smart_with(
    series: &[Observation],
    target_points: usize,
    window: usize,
    threshold: InflectionThreshold,
    preserve_features: bool,
) -> SamplingResult {
    profiling::scope!("smart");

    if series.is_empty() {
        return SamplingResult::empty();
    }

    let values = crate::series::values(series);
    let features = preserve_features.then(|| {
        let epsilon = threshold.resolve(&values);
        detect_features(&values, window, epsilon)
    });

    let indices = smart_indices(&values, target_points, features.as_ref());
    SamplingResult::from_indices(series, indices, AppliedStrategy::Smart, features)
}

/// Critical positions first, then log-spaced fill, then variation-ranked fill
fn smart_indices(values: &[f64], target_points: usize, features: Option<&FeatureSet>) -> Vec<usize> {
    let n = values.len();
    let mut critical: BTreeSet<usize> = BTreeSet::from([0, n - 1]);

    if let Some(features) = features {
        critical.extend(features.iter());
    }

    let remaining = target_points.saturating_sub(critical.len());
    if remaining > 0 {
        critical.extend(log_spaced_indices(n, remaining));
    }

    let shortfall = target_points.saturating_sub(critical.len());
    if shortfall > 0 {
        critical.extend(top_variation_indices(values, shortfall));
    }

    critical.into_iter().collect()
}
