//! Sampling configuration
//!
//! A `SamplingConfig` is immutable once handed to a `SeriesSampler`. It can
//! be persisted to and restored from JSON; missing fields fall back to the
//! defaults in [`crate::constants`].

use crate::constants::{features, sampling};
use crate::error::{Result, SamplerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Reduction strategy
///
/// Parsing never fails: any unrecognized name selects `Smart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Strategy {
    Uniform,
    Smart,
    Lod,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Smart
    }
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Uniform => "uniform",
            Strategy::Smart => "smart",
            Strategy::Lod => "lod",
        }
    }
}

impl From<&str> for Strategy {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" => Strategy::Uniform,
            "lod" => Strategy::Lod,
            _ => Strategy::Smart,
        }
    }
}

impl From<String> for Strategy {
    fn from(name: String) -> Self {
        Strategy::from(name.as_str())
    }
}

impl FromStr for Strategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Strategy::from(s))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visible window as fractions of the series length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: f64,
    pub end: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Bounds clamped to `[0, 1]` and put in order
    pub fn normalized(&self) -> (f64, f64) {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        let (a, b) = (clamp(self.start), clamp(self.end));
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Positional `[start, end)` range this viewport covers in a series of length `n`
    pub fn index_range(&self, n: usize) -> (usize, usize) {
        let (start, end) = self.normalized();
        let view_start = ((start * n as f64).floor() as usize).min(n);
        let view_end = ((end * n as f64).ceil() as usize).clamp(view_start, n);
        (view_start, view_end)
    }
}

/// Minimum trend magnitude for a sign change to count as an inflection point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InflectionThreshold {
    /// Fixed epsilon in value units
    Absolute(f64),
    /// Fraction of the series' value range (`max - min`)
    RelativeToRange(f64),
}

impl Default for InflectionThreshold {
    fn default() -> Self {
        InflectionThreshold::Absolute(features::DEFAULT_INFLECTION_EPSILON)
    }
}

impl InflectionThreshold {
    /// Concrete epsilon for the given values
    pub fn resolve(&self, values: &[f64]) -> f64 {
        match *self {
            InflectionThreshold::Absolute(eps) => eps,
            InflectionThreshold::RelativeToRange(fraction) => {
                let (min, max) = values
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                if max > min { (max - min) * fraction } else { 0.0 }
            }
        }
    }

    fn value(&self) -> f64 {
        match *self {
            InflectionThreshold::Absolute(v) | InflectionThreshold::RelativeToRange(v) => v,
        }
    }
}

/// Configuration held by a sampler instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SamplingConfig {
    /// Series at or below this length are not sampled
    pub max_points: usize,
    /// Desired output length when sampling triggers (soft for `smart`)
    pub target_points: usize,
    /// Seed peaks, valleys and inflection points before filling the budget
    pub preserve_features: bool,
    /// Default strategy when the caller does not choose one
    pub strategy: Strategy,
    /// Neighborhood radius for feature detection
    pub smoothing_window: usize,
    /// Visible window used by the `lod` strategy
    pub viewport: Viewport,
    pub inflection_threshold: InflectionThreshold,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_points: sampling::DEFAULT_MAX_POINTS,
            target_points: sampling::DEFAULT_TARGET_POINTS,
            preserve_features: true,
            strategy: Strategy::default(),
            smoothing_window: sampling::DEFAULT_SMOOTHING_WINDOW,
            viewport: Viewport::default(),
            inflection_threshold: InflectionThreshold::default(),
        }
    }
}

impl SamplingConfig {
    /// Reject settings the samplers cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.max_points == 0 {
            return Err(SamplerError::InvalidConfig(
                "maxPoints must be at least 1".to_string(),
            ));
        }
        if self.target_points < sampling::MIN_TARGET_POINTS {
            return Err(SamplerError::InvalidConfig(format!(
                "targetPoints must be at least {}, got {}",
                sampling::MIN_TARGET_POINTS,
                self.target_points
            )));
        }
        if self.smoothing_window == 0 {
            return Err(SamplerError::InvalidConfig(
                "smoothingWindow must be at least 1".to_string(),
            ));
        }
        if !self.viewport.start.is_finite() || !self.viewport.end.is_finite() {
            return Err(SamplerError::InvalidConfig(
                "viewport bounds must be finite".to_string(),
            ));
        }
        let threshold = self.inflection_threshold.value();
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SamplerError::InvalidConfig(format!(
                "inflection threshold must be a non-negative number, got {}",
                threshold
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SamplingConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
