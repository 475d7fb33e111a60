//! Decision threshold sweep
//!
//! A trained classifier emits per-AU probabilities; the operating threshold
//! is a free parameter. After each validation pass the trainer sweeps a
//! uniform grid of candidate thresholds and keeps the one that maximizes F1.
//! The test split is then scored at the validation-optimal threshold rather
//! than the 0.5 default.

use crate::train::{F1Score, Metric};
use crate::Tensor;

/// Default number of grid points for the sweep
pub const DEFAULT_SWEEP_POINTS: usize = 200;

/// Uniform grid of `n` candidate thresholds in [0.01, 0.99]
pub fn threshold_grid(n: usize) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0.5];
    }
    let lo = 0.01f32;
    let hi = 0.99f32;
    let step = (hi - lo) / (n - 1) as f32;
    (0..n).map(|i| lo + i as f32 * step).collect()
}

/// Outcome of a threshold sweep
#[derive(Clone, Copy, Debug)]
pub struct SweepResult {
    /// Best F1 found over the grid
    pub f1_max: f32,
    /// Threshold achieving the best F1
    pub best_threshold: f32,
    /// F1 at the conventional 0.5 threshold, for comparison
    pub f1_default: f32,
}

/// Sweep F1 over a threshold grid and return the best operating point
///
/// `probabilities` are post-sigmoid outputs; ties keep the first (lowest)
/// threshold achieving the maximum.
pub fn sweep_f1(probabilities: &Tensor, targets: &Tensor, n_points: usize) -> SweepResult {
    let f1_default = F1Score::new(0.5).compute(probabilities, targets);

    let mut f1_max = f32::NEG_INFINITY;
    let mut best_threshold = 0.5;
    for threshold in threshold_grid(n_points) {
        let f1 = F1Score::new(threshold).compute(probabilities, targets);
        if f1 > f1_max {
            f1_max = f1;
            best_threshold = threshold;
        }
    }

    if !f1_max.is_finite() {
        f1_max = f1_default;
    }

    SweepResult {
        f1_max,
        best_threshold,
        f1_default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn probs(v: &[f32]) -> Tensor {
        Tensor::from_vec(v.to_vec(), false)
    }

    #[test]
    fn test_grid_endpoints() {
        let grid = threshold_grid(200);
        assert_eq!(grid.len(), 200);
        assert_relative_eq!(grid[0], 0.01);
        assert_relative_eq!(grid[199], 0.99, epsilon = 1e-5);
    }

    #[test]
    fn test_grid_is_increasing() {
        let grid = threshold_grid(50);
        for pair in grid.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_grid_degenerate_sizes() {
        assert!(threshold_grid(0).is_empty());
        assert_eq!(threshold_grid(1), vec![0.5]);
    }

    #[test]
    fn test_sweep_beats_default_when_calibration_is_off() {
        // Positives cluster around 0.3, so 0.5 misses them all
        let p = probs(&[0.35, 0.32, 0.30, 0.05, 0.02]);
        let t = probs(&[1.0, 1.0, 1.0, 0.0, 0.0]);

        let result = sweep_f1(&p, &t, 200);
        assert_relative_eq!(result.f1_default, 0.0);
        assert_relative_eq!(result.f1_max, 1.0);
        assert!(result.best_threshold < 0.3);
    }

    #[test]
    fn test_sweep_max_at_least_default() {
        let p = probs(&[0.9, 0.6, 0.4, 0.1]);
        let t = probs(&[1.0, 1.0, 0.0, 0.0]);

        let result = sweep_f1(&p, &t, 200);
        assert!(result.f1_max >= result.f1_default);
    }

    #[test]
    fn test_sweep_ties_keep_lowest_threshold() {
        // Perfectly separated, so a whole band of thresholds gives F1 = 1
        let p = probs(&[0.9, 0.1]);
        let t = probs(&[1.0, 0.0]);

        let result = sweep_f1(&p, &t, 200);
        assert_relative_eq!(result.f1_max, 1.0);
        // First grid point above 0.1 wins the tie
        assert!(result.best_threshold > 0.1 && result.best_threshold < 0.2);
    }
}
