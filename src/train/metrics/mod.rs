//! Threshold-based classification metrics
//!
//! Model outputs are continuous probabilities, so every metric takes a
//! decision threshold. The validation sweep in [`crate::eval`] evaluates
//! [`F1Score`] over a grid of thresholds to pick the operating point.

use crate::Tensor;

/// Trait for evaluation metrics
pub trait Metric {
    /// Compute the metric given predictions and targets
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32;

    /// Name of the metric
    fn name(&self) -> &str;

    /// Whether higher values are better
    fn higher_is_better(&self) -> bool {
        true
    }
}

/// Binarize continuous predictions and targets at a threshold
fn threshold_to_labels(
    predictions: &Tensor,
    targets: &Tensor,
    threshold: f32,
) -> (Vec<bool>, Vec<bool>) {
    let y_pred = predictions.data().iter().map(|&p| p >= threshold).collect();
    let y_true = targets.data().iter().map(|&t| t >= 0.5).collect();
    (y_pred, y_true)
}

/// Precision of the positive class (TP / predicted positives)
#[derive(Debug, Clone)]
pub struct Precision {
    pub(crate) threshold: f32,
}

impl Precision {
    /// Precision at the given decision threshold
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Metric for Precision {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }

        let (y_pred, y_true) = threshold_to_labels(predictions, targets, self.threshold);

        let mut true_positives = 0usize;
        let mut predicted_positives = 0usize;
        for (&p, &t) in y_pred.iter().zip(y_true.iter()) {
            if p {
                predicted_positives += 1;
                if t {
                    true_positives += 1;
                }
            }
        }

        if predicted_positives == 0 {
            return 0.0;
        }
        true_positives as f32 / predicted_positives as f32
    }

    fn name(&self) -> &'static str {
        "Precision"
    }
}

/// Recall of the positive class (TP / actual positives)
#[derive(Debug, Clone)]
pub struct Recall {
    pub(crate) threshold: f32,
}

impl Recall {
    /// Recall at the given decision threshold
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for Recall {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Metric for Recall {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }

        let (y_pred, y_true) = threshold_to_labels(predictions, targets, self.threshold);

        let mut true_positives = 0usize;
        let mut actual_positives = 0usize;
        for (&p, &t) in y_pred.iter().zip(y_true.iter()) {
            if t {
                actual_positives += 1;
                if p {
                    true_positives += 1;
                }
            }
        }

        if actual_positives == 0 {
            return 0.0;
        }
        true_positives as f32 / actual_positives as f32
    }

    fn name(&self) -> &'static str {
        "Recall"
    }
}

/// F1 score (harmonic mean of precision and recall)
///
/// # Example
///
/// ```
/// use aunet::train::{F1Score, Metric};
/// use aunet::Tensor;
///
/// let metric = F1Score::new(0.5);
/// let pred = Tensor::from_vec(vec![0.9, 0.8, 0.2, 0.1], false);
/// let target = Tensor::from_vec(vec![1.0, 0.0, 1.0, 0.0], false);
///
/// let f1 = metric.compute(&pred, &target);
/// assert!(f1 > 0.0 && f1 <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct F1Score {
    precision: Precision,
    recall: Recall,
}

impl F1Score {
    /// F1 at the given decision threshold
    pub fn new(threshold: f32) -> Self {
        Self {
            precision: Precision::new(threshold),
            recall: Recall::new(threshold),
        }
    }
}

impl Default for F1Score {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Metric for F1Score {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        let precision = self.precision.compute(predictions, targets);
        let recall = self.recall.compute(predictions, targets);

        if precision + recall == 0.0 {
            return 0.0;
        }
        2.0 * (precision * recall) / (precision + recall)
    }

    fn name(&self) -> &'static str {
        "F1"
    }
}
