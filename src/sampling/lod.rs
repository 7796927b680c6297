//! Viewport-aware level-of-detail sampling
//!
//! The visible window gets a dense feature-preserving sample, the context
//! on either side gets a sparse uniform one. The context budget is split
//! between the two sides in proportion to their lengths.

use super::smart::smart_with;
use super::uniform::uniform_indices;
use super::{AppliedStrategy, SamplingResult};
use crate::config::{InflectionThreshold, Viewport};
use crate::constants::{lod::VISIBLE_SHARE, sampling::MIN_TARGET_POINTS};
use crate::series::Observation;

/// Sample densely inside `viewport` and sparsely outside it
pub fn lod(
    series: &[Observation],
    target_points: usize,
    window: usize,
    viewport: Viewport,
) -> SamplingResult {
    lod_with(
        series,
        target_points,
        window,
        viewport,
        InflectionThreshold::default(),
        true,
    )
}

/// Per-region point budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Budget {
    before: usize,
    visible: usize,
    after: usize,
}

impl Budget {
    fn split(target_points: usize, before_len: usize, after_len: usize) -> Self {
        let visible = ((target_points as f64 * VISIBLE_SHARE).round() as usize).max(MIN_TARGET_POINTS);
        let context = target_points.saturating_sub(visible);
        let context_len = before_len + after_len;

        let (before, after) = if context_len == 0 {
            (0, 0)
        } else {
            let before = (context as f64 * before_len as f64 / context_len as f64).round() as usize;
            (before, context - before)
        };
        Self {
            before,
            visible,
            after,
        }
    }
}

pub(crate) fn lod_with(
    series: &[Observation],
    target_points: usize,
    window: usize,
    viewport: Viewport,
    threshold: InflectionThreshold,
    preserve_features: bool,
) -> SamplingResult {
    profiling::scope!("lod");

    let n = series.len();
    if n == 0 {
        return SamplingResult::empty();
    }

    let (view_start, view_end) = viewport.index_range(n);
    let budget = Budget::split(target_points, view_start, n - view_end);

    let mut indices = uniform_indices(view_start, budget.before);

    let visible = &series[view_start..view_end];
    let visible_sample = smart_with(visible, budget.visible, window, threshold, preserve_features);
    indices.extend(visible_sample.sampled_indices.iter().map(|&i| i + view_start));

    indices.extend(
        uniform_indices(n - view_end, budget.after)
            .into_iter()
            .map(|i| i + view_end),
    );

    let features = visible_sample.features.map(|f| f.rebased(view_start));
    SamplingResult::from_indices(series, indices, AppliedStrategy::Lod, features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::test_support::{assert_invariants, loss_curve};

    fn density(indices: &[usize], range: std::ops::Range<usize>) -> f64 {
        let len = range.len() as f64;
        indices.iter().filter(|i| range.contains(i)).count() as f64 / len
    }

    #[test]
    fn test_budget_split() {
        let budget = Budget::split(200, 400, 400);
        assert_eq!(budget.visible, 140);
        assert_eq!(budget.before, 30);
        assert_eq!(budget.after, 30);

        let budget = Budget::split(200, 0, 600);
        assert_eq!(budget.before, 0);
        assert_eq!(budget.after, 60);

        let budget = Budget::split(200, 0, 0);
        assert_eq!(budget.visible, 140);
        assert_eq!(budget.before + budget.after, 0);
    }

    #[test]
    fn test_lod_is_denser_in_viewport() {
        let series = loss_curve(1000);
        let result = lod(&series, 200, 3, Viewport::new(0.4, 0.6));
        let idx = &result.sampled_indices;

        let inside = density(idx, 400..600);
        let outside = (density(idx, 0..400) * 400.0 + density(idx, 600..1000) * 400.0) / 800.0;
        assert!(inside > outside * 4.0, "inside {} outside {}", inside, outside);
        assert_eq!(result.strategy, AppliedStrategy::Lod);
        assert_invariants(&series, &result);
    }

    #[test]
    fn test_lod_features_are_rebased() {
        let series: Vec<Observation> = (0..1000)
            .map(|i| Observation::new(i as f64, if i == 500 { 5.0 } else { 0.0 }))
            .collect();
        let result = lod(&series, 100, 3, Viewport::new(0.4, 0.6));

        let features = result.features.as_ref().unwrap();
        assert!(features.peaks.contains(&500));
        assert!(result.sampled_indices.contains(&500));
        assert_invariants(&series, &result);
    }

    #[test]
    fn test_lod_viewport_at_edges() {
        let series = loss_curve(500);

        let result = lod(&series, 100, 3, Viewport::new(0.0, 0.3));
        assert_invariants(&series, &result);

        let result = lod(&series, 100, 3, Viewport::new(0.8, 1.0));
        assert_invariants(&series, &result);

        let result = lod(&series, 100, 3, Viewport::default());
        assert_invariants(&series, &result);
    }

    #[test]
    fn test_lod_empty_viewport() {
        let series = loss_curve(500);
        let result = lod(&series, 100, 3, Viewport::new(0.5, 0.5));
        assert_invariants(&series, &result);
        assert!(result.features.is_none());
        assert!(result.sampled_indices.contains(&249));
        assert!(result.sampled_indices.contains(&250));
    }

    #[test]
    fn test_lod_reversed_viewport() {
        let series = loss_curve(1000);
        let a = lod(&series, 200, 3, Viewport::new(0.6, 0.4));
        let b = lod(&series, 200, 3, Viewport::new(0.4, 0.6));
        assert_eq!(a.sampled_indices, b.sampled_indices);
    }
}
