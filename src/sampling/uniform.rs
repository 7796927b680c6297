//! Even-stride sampling

use super::{AppliedStrategy, SamplingResult};
use crate::series::Observation;

/// Every `ceil(n / target_points)`-th observation plus the last one
pub fn uniform(series: &[Observation], target_points: usize) -> SamplingResult {
    profiling::scope!("uniform");

    let indices = uniform_indices(series.len(), target_points);
    SamplingResult::from_indices(series, indices, AppliedStrategy::Uniform, None)
}

/// Strided positions over `0..n`, always including `0` and `n - 1`
pub(crate) fn uniform_indices(n: usize, target_points: usize) -> Vec<usize> {
    match n {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }

    let step = n.div_ceil(target_points.max(1));
    let mut indices: Vec<usize> = (0..n - 1).step_by(step).collect();
    indices.push(n - 1);
    indices
}
