//! Index generators used to top up a sampling budget

use std::f64::consts::E;

/// Up to `count` interior positions in `[1, n - 2]` on a logarithmic warp
///
/// Evenly spaced progress values `i / (count + 1)` are passed through
/// `ln(1 + p * (e - 1))`, which maps `[0, 1]` onto itself with a concave
/// curve, then scaled and floored. Positions that floor to the same index
/// collapse, so fewer than `count` may come back.
pub fn log_spaced_indices(n: usize, count: usize) -> Vec<usize> {
    profiling::scope!("log_spaced_indices");

    if n < 3 || count == 0 {
        return Vec::new();
    }

    let interior = (n - 2) as f64;
    let mut indices: Vec<usize> = (1..=count)
        .map(|i| {
            let progress = i as f64 / (count + 1) as f64;
            let warped = (1.0 + progress * (E - 1.0)).ln() / E.ln();
            (1 + (warped * interior).floor() as usize).min(n - 2)
        })
        .collect();
    indices.dedup();
    indices
}

/// The `count` interior positions that deviate most from their neighbors' midpoint
///
/// Variation at `i` is `|v[i] - (v[i-1] + v[i+1]) / 2|`. Ranking is a stable
/// descending sort, so equal variations keep their positional order and the
/// output is deterministic. Returned in rank order, not position order.
pub fn top_variation_indices(values: &[f64], count: usize) -> Vec<usize> {
    profiling::scope!("top_variation_indices");

    let n = values.len();
    if n < 3 || count == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, f64)> = (1..n - 1)
        .map(|i| {
            let variation = (values[i] - (values[i - 1] + values[i + 1]) / 2.0).abs();
            (i, if variation.is_nan() { 0.0 } else { variation })
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked.into_iter().take(count).map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_spaced_bounds_and_order() {
        let indices = log_spaced_indices(1000, 50);
        assert!(!indices.is_empty());
        assert!(indices.len() <= 50);
        assert!(indices.iter().all(|&i| (1..=998).contains(&i)));
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_spaced_warp() {
        let indices = log_spaced_indices(1000, 5);
        assert_eq!(indices.len(), 5);

        let first_gap = indices[1] - indices[0];
        let last_gap = indices[4] - indices[3];
        assert!(first_gap > last_gap, "gaps {:?}", indices);
    }

    #[test]
    fn test_log_spaced_dedup() {
        let indices = log_spaced_indices(4, 10);
        assert!(indices.len() <= 2);
        assert!(indices.iter().all(|&i| i == 1 || i == 2));
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_spaced_degenerate() {
        assert!(log_spaced_indices(2, 10).is_empty());
        assert!(log_spaced_indices(100, 0).is_empty());
    }

    #[test]
    fn test_top_variation_ranking() {
        let values = [0.0, 0.0, 5.0, 0.0, 0.0, 1.0, 0.0];
        // Positions 1 and 3 tie at 2.5 and keep their order
        assert_eq!(top_variation_indices(&values, 3), vec![2, 1, 3]);
        assert_eq!(top_variation_indices(&values, 100), vec![2, 1, 3, 5, 4]);
    }

    #[test]
    fn test_top_variation_straight_line() {
        let values: Vec<f64> = (0..10).map(|i| i as f64 * 2.0).collect();
        // All variations are zero, so ranking falls back to position order
        assert_eq!(top_variation_indices(&values, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_top_variation_degenerate() {
        assert!(top_variation_indices(&[1.0, 2.0], 5).is_empty());
        assert!(top_variation_indices(&[1.0, 2.0, 3.0], 0).is_empty());
    }
}
