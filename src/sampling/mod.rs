//! Feature-preserving series reduction
//!
//! Every strategy selects a subset of the original observations by
//! position. None of them smooth, interpolate or invent values, and all of
//! them keep the first and last observation so chart axes do not drift.
//!
//! - [`uniform`]: even stride plus endpoints
//! - [`smart`]: detected features first, then log-spaced and
//!   variation-ranked fill up to the budget
//! - [`lod`]: dense `smart` inside a viewport, sparse `uniform` around it
//! - [`SeriesSampler`]: threshold check, dispatch, and batch sampling

mod facade;
mod features;
mod lod;
mod selectors;
mod smart;
mod uniform;

pub use facade::{MultiSeriesResult, SeriesMetadata, SeriesSampler};
pub use features::detect_features;
pub use lod::lod;
pub use selectors::{log_spaced_indices, top_variation_indices};
pub use smart::smart;
pub use uniform::uniform;

use crate::config::Strategy;
use crate::series::Observation;
use serde::Serialize;

/// Strategy that actually produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedStrategy {
    /// Series was short enough to return unchanged
    None,
    Uniform,
    Smart,
    Lod,
}

impl From<Strategy> for AppliedStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Uniform => AppliedStrategy::Uniform,
            Strategy::Smart => AppliedStrategy::Smart,
            Strategy::Lod => AppliedStrategy::Lod,
        }
    }
}

/// Positions of salient shape features
///
/// The three lists are each ascending but may share positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub peaks: Vec<usize>,
    pub valleys: Vec<usize>,
    pub inflection_points: Vec<usize>,
}

impl FeatureSet {
    /// All feature positions, possibly with repeats
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.peaks
            .iter()
            .chain(&self.valleys)
            .chain(&self.inflection_points)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.peaks.len() + self.valleys.len() + self.inflection_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shift every position by `offset`
    pub(crate) fn rebased(mut self, offset: usize) -> Self {
        for idx in self
            .peaks
            .iter_mut()
            .chain(self.valleys.iter_mut())
            .chain(self.inflection_points.iter_mut())
        {
            *idx += offset;
        }
        self
    }
}

/// Reduced series plus what the chart needs to label and re-hydrate it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingResult {
    pub data: Vec<Observation>,
    /// Ascending, unique positions into the original series
    pub sampled_indices: Vec<usize>,
    pub original_length: usize,
    /// `data.len() / original_length`, `1.0` for empty input
    pub compression_ratio: f64,
    pub strategy: AppliedStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSet>,
}

impl SamplingResult {
    /// Result for empty input
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            sampled_indices: Vec::new(),
            original_length: 0,
            compression_ratio: 1.0,
            strategy: AppliedStrategy::None,
            features: None,
        }
    }

    /// The whole series, untouched
    pub fn identity(series: &[Observation]) -> Self {
        if series.is_empty() {
            return Self::empty();
        }
        Self {
            data: series.to_vec(),
            sampled_indices: (0..series.len()).collect(),
            original_length: series.len(),
            compression_ratio: 1.0,
            strategy: AppliedStrategy::None,
            features: None,
        }
    }

    /// Build a result from ascending, unique positions into `series`
    pub(crate) fn from_indices(
        series: &[Observation],
        sampled_indices: Vec<usize>,
        strategy: AppliedStrategy,
        features: Option<FeatureSet>,
    ) -> Self {
        debug_assert!(sampled_indices.windows(2).all(|w| w[0] < w[1]));

        if series.is_empty() {
            return Self::empty();
        }
        let data: Vec<Observation> = sampled_indices.iter().map(|&i| series[i]).collect();
        let compression_ratio = data.len() as f64 / series.len() as f64;
        Self {
            data,
            sampled_indices,
            original_length: series.len(),
            compression_ratio,
            strategy,
            features,
        }
    }

    /// Number of sampled points
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::series::{Observation, Series};

    /// Deterministic noisy decay curve, similar to a training loss
    pub fn loss_curve(n: usize) -> Series {
        (0..n)
            .map(|i| {
                let t = i as f64;
                let noise = ((t * 12.9898).sin() * 43758.5453).fract() * 0.05;
                Observation::new(t, 3.0 * (-t / 150.0).exp() + 0.5 + noise)
            })
            .collect()
    }

    /// Check the invariants every non-degenerate result must hold
    pub fn assert_invariants(series: &[Observation], result: &super::SamplingResult) {
        let idx = &result.sampled_indices;
        assert_eq!(idx[0], 0, "first index must be 0");
        assert_eq!(*idx.last().unwrap(), series.len() - 1, "last index must be n-1");
        assert!(idx.windows(2).all(|w| w[0] < w[1]), "indices must be strictly increasing");
        assert_eq!(result.data.len(), idx.len());
        for (k, &i) in idx.iter().enumerate() {
            assert_eq!(result.data[k], series[i]);
        }
        let ratio = result.data.len() as f64 / series.len() as f64;
        assert_eq!(result.compression_ratio, ratio);
        assert!(result.compression_ratio > 0.0 && result.compression_ratio <= 1.0);
    }
}
