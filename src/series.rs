//! Observation and series types shared by every sampler

use crate::error::{Result, SamplerError};
use serde::{Deserialize, Serialize};

/// A single (step, value) point of a metric curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub step: f64,
    pub value: f64,
    /// Optional error band, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<f64>,
}

impl Observation {
    pub fn new(step: f64, value: f64) -> Self {
        Self {
            step,
            value,
            stderr: None,
        }
    }

    pub fn with_stderr(step: f64, value: f64, stderr: f64) -> Self {
        Self {
            step,
            value,
            stderr: Some(stderr),
        }
    }
}

/// An ordered sequence of observations, indexed by position
pub type Series = Vec<Observation>;

/// Check that every step and value is finite and steps never decrease
pub fn validate_series(series: &[Observation]) -> Result<()> {
    let mut prev_step = f64::NEG_INFINITY;
    for (index, obs) in series.iter().enumerate() {
        if !obs.step.is_finite() || !obs.value.is_finite() {
            return Err(SamplerError::NonFiniteObservation { index });
        }
        if obs.step < prev_step {
            return Err(SamplerError::UnorderedSteps { index });
        }
        prev_step = obs.step;
    }
    Ok(())
}

/// Unsampled slice of `series` covering `start_step..=end_step`
///
/// Used to re-hydrate full detail when a chart zooms in. Starts at the
/// first observation with `step >= start_step` and stops before the first
/// with `step > end_step`.
pub fn full_data_for_range(series: &[Observation], start_step: f64, end_step: f64) -> &[Observation] {
    profiling::scope!("full_data_for_range");

    let start = series
        .iter()
        .position(|obs| obs.step >= start_step)
        .unwrap_or(series.len());
    let end = series
        .iter()
        .position(|obs| obs.step > end_step)
        .unwrap_or(series.len());

    if end <= start {
        return &[];
    }
    &series[start..end]
}

/// Values of a series, in order
pub(crate) fn values(series: &[Observation]) -> Vec<f64> {
    series.iter().map(|obs| obs.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Series {
        (0..n).map(|i| Observation::new(i as f64 * 10.0, i as f64)).collect()
    }

    #[test]
    fn test_full_data_for_range() {
        let series = ramp(100);
        let slice = full_data_for_range(&series, 100.0, 200.0);

        assert_eq!(slice.len(), 11);
        assert_eq!(slice[0].step, 100.0);
        assert_eq!(slice[10].step, 200.0);
    }

    #[test]
    fn test_full_data_for_range_between_steps() {
        let series = ramp(10);
        let slice = full_data_for_range(&series, 15.0, 35.0);
        let steps: Vec<f64> = slice.iter().map(|o| o.step).collect();
        assert_eq!(steps, vec![20.0, 30.0]);
    }

    #[test]
    fn test_full_data_for_range_out_of_bounds() {
        let series = ramp(10);
        assert!(full_data_for_range(&series, 500.0, 600.0).is_empty());
        assert!(full_data_for_range(&series, 50.0, 10.0).is_empty());
        assert_eq!(full_data_for_range(&series, -5.0, 1e9).len(), 10);
        assert!(full_data_for_range(&[], 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_validate_series() {
        assert!(validate_series(&ramp(5)).is_ok());
        assert!(validate_series(&[]).is_ok());

        let mut bad = ramp(5);
        bad[3].value = f64::NAN;
        assert!(matches!(
            validate_series(&bad),
            Err(SamplerError::NonFiniteObservation { index: 3 })
        ));

        let mut unordered = ramp(5);
        unordered[2].step = -1.0;
        assert!(matches!(
            validate_series(&unordered),
            Err(SamplerError::UnorderedSteps { index: 2 })
        ));
    }

    #[test]
    fn test_repeated_steps_are_valid() {
        let series = vec![
            Observation::new(1.0, 0.5),
            Observation::new(1.0, 0.6),
            Observation::new(2.0, 0.4),
        ];
        assert!(validate_series(&series).is_ok());
    }

    #[test]
    fn test_stderr_serialization() {
        let obs = Observation::with_stderr(1.0, 2.0, 0.1);
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"step":1.0,"value":2.0,"stderr":0.1}"#);

        let plain = serde_json::to_string(&Observation::new(1.0, 2.0)).unwrap();
        assert_eq!(plain, r#"{"step":1.0,"value":2.0}"#);
    }
}
