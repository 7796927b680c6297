//! Entry point used by charting code
//!
//! A `SeriesSampler` owns an immutable [`SamplingConfig`]. It decides
//! whether a series needs sampling at all, dispatches to the configured
//! strategy, and fans out over a map of named runs.

use super::lod::lod_with;
use super::smart::smart_with;
use super::uniform::uniform;
use super::{AppliedStrategy, SamplingResult};
use crate::config::{SamplingConfig, Strategy};
use crate::error::Result;
use crate::series::{Observation, Series, validate_series};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Lightweight per-series summary for UI labels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMetadata {
    pub original_length: usize,
    pub sampled_length: usize,
    pub compression_ratio: f64,
    pub strategy: AppliedStrategy,
    pub sampled_indices: Vec<usize>,
}

impl From<&SamplingResult> for SeriesMetadata {
    fn from(result: &SamplingResult) -> Self {
        Self {
            original_length: result.original_length,
            sampled_length: result.len(),
            compression_ratio: result.compression_ratio,
            strategy: result.strategy,
            sampled_indices: result.sampled_indices.clone(),
        }
    }
}

/// Results of sampling several named series independently
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSeriesResult {
    pub results: BTreeMap<String, SamplingResult>,
    pub metadata: BTreeMap<String, SeriesMetadata>,
    /// Series that were sampled despite irregular input, with the reason
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: BTreeMap<String, String>,
}

impl MultiSeriesResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Immutably configured sampler
#[derive(Debug, Clone, Default)]
pub struct SeriesSampler {
    config: SamplingConfig,
}

impl SeriesSampler {
    /// Create a sampler, rejecting configurations it cannot honor
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Whether a series of `length` points exceeds `max_points`
    pub fn needs_sampling(&self, length: usize) -> bool {
        length > self.config.max_points
    }

    /// Sample with the configured strategy
    pub fn sample_series(&self, series: &[Observation]) -> SamplingResult {
        self.sample_series_with(series, self.config.strategy)
    }

    /// Sample with an explicit strategy
    ///
    /// Empty input gives an empty result. Series with a single point or at
    /// most `max_points` points come back unchanged with strategy `none`.
    pub fn sample_series_with(&self, series: &[Observation], strategy: Strategy) -> SamplingResult {
        profiling::scope!("sample_series");

        if series.is_empty() {
            return SamplingResult::empty();
        }
        if series.len() < 2 || !self.needs_sampling(series.len()) {
            return SamplingResult::identity(series);
        }

        let config = &self.config;
        let result = match strategy {
            Strategy::Uniform => uniform(series, config.target_points),
            Strategy::Smart => smart_with(
                series,
                config.target_points,
                config.smoothing_window,
                config.inflection_threshold,
                config.preserve_features,
            ),
            Strategy::Lod => lod_with(
                series,
                config.target_points,
                config.smoothing_window,
                config.viewport,
                config.inflection_threshold,
                config.preserve_features,
            ),
        };

        debug!(
            strategy = %strategy,
            original = series.len(),
            sampled = result.len(),
            ratio = result.compression_ratio,
            "sampled series"
        );
        result
    }

    /// Sample every named series with the configured strategy
    pub fn sample_metric_data(&self, runs: &BTreeMap<String, Series>) -> MultiSeriesResult {
        self.sample_metric_data_with(runs, self.config.strategy)
    }

    /// Sample every named series independently
    ///
    /// Sampling works on positions, so every series is sampled. Steps that
    /// go backwards (a resumed run) or non-finite points are noted in
    /// `warnings` without dropping the series.
    pub fn sample_metric_data_with(
        &self,
        runs: &BTreeMap<String, Series>,
        strategy: Strategy,
    ) -> MultiSeriesResult {
        profiling::scope!("sample_metric_data");

        let mut output = MultiSeriesResult::default();
        for (name, series) in runs {
            if let Err(e) = validate_series(series) {
                warn!(series = %name, error = %e, "irregular series");
                output.warnings.insert(name.clone(), e.to_string());
            }

            let result = self.sample_series_with(series, strategy);
            output.metadata.insert(name.clone(), SeriesMetadata::from(&result));
            output.results.insert(name.clone(), result);
        }
        output
    }
}
