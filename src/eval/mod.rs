//! Model evaluation
//!
//! Shared plumbing for the validation and test passes: run the model over a
//! split, pool the per-sample probabilities, and score them either with a
//! threshold sweep ([`sweep_f1`]) or at a fixed operating point
//! ([`evaluate_split`]).

mod report;
mod sweep;

pub use report::TestReport;
pub use sweep::{sweep_f1, threshold_grid, SweepResult, DEFAULT_SWEEP_POINTS};

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::train::{Batch, F1Score, LossFn, Metric, Precision, Recall};
use crate::Tensor;

/// Metrics for one split at a fixed threshold
#[derive(Clone, Copy, Debug)]
pub struct EvalSummary {
    /// Mean per-batch loss
    pub loss: f32,
    /// F1 at `threshold`
    pub f1: f32,
    /// Precision at `threshold`
    pub precision: f32,
    /// Recall at `threshold`
    pub recall: f32,
    /// Decision threshold the scores were computed at
    pub threshold: f32,
    /// Number of scored label entries
    pub samples: usize,
}

/// Run the model over a split and pool probabilities and targets
///
/// Inputs are treated as detached; no gradients are recorded. Returns the
/// pooled post-sigmoid probabilities, the pooled targets, and the mean
/// per-batch loss.
pub(crate) fn collect_outputs<F>(
    batches: &[Batch],
    forward_fn: &F,
    loss_fn: &dyn LossFn,
) -> Result<(Tensor, Tensor, f32)>
where
    F: Fn(&Tensor, Option<&Tensor>) -> Tensor,
{
    if batches.is_empty() {
        return Err(Error::Config("evaluation split is empty".to_string()));
    }

    let mut probs: Vec<f32> = Vec::new();
    let mut targets: Vec<f32> = Vec::new();
    let mut total_loss = 0.0;

    for batch in batches {
        let inputs = batch.inputs.detach();
        let logits = forward_fn(&inputs, batch.flow.as_ref());
        let loss = loss_fn.forward(&logits.detach(), &batch.targets);
        total_loss += loss.data()[0];

        let batch_probs = sigmoid(logits.data());
        probs.extend(batch_probs.iter());
        targets.extend(batch.targets.data().iter());
    }

    let avg_loss = total_loss / batches.len() as f32;
    Ok((
        Tensor::from_vec(probs, false),
        Tensor::from_vec(targets, false),
        avg_loss,
    ))
}

fn sigmoid(x: &Array1<f32>) -> Array1<f32> {
    x.mapv(|v| {
        if v >= 0.0 {
            1.0 / (1.0 + (-v).exp())
        } else {
            let e = v.exp();
            e / (1.0 + e)
        }
    })
}

/// Score a split at a fixed decision threshold
///
/// Used for the test pass, where the threshold comes from the validation
/// sweep instead of being re-tuned on test labels.
pub fn evaluate_split<F>(
    batches: &[Batch],
    forward_fn: &F,
    loss_fn: &dyn LossFn,
    threshold: f32,
) -> Result<EvalSummary>
where
    F: Fn(&Tensor, Option<&Tensor>) -> Tensor,
{
    let (probs, targets, loss) = collect_outputs(batches, forward_fn, loss_fn)?;

    Ok(EvalSummary {
        loss,
        f1: F1Score::new(threshold).compute(&probs, &targets),
        precision: Precision::new(threshold).compute(&probs, &targets),
        recall: Recall::new(threshold).compute(&probs, &targets),
        threshold,
        samples: probs.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::BCEWithLogitsLoss;
    use approx::assert_relative_eq;

    fn batch(logit_like: &[f32], labels: &[f32]) -> Batch {
        Batch::new(
            Tensor::from_vec(logit_like.to_vec(), false),
            Tensor::from_vec(labels.to_vec(), false),
        )
    }

    // Identity head: the inputs are already logits
    fn identity(inputs: &Tensor, _flow: Option<&Tensor>) -> Tensor {
        inputs.clone()
    }

    #[test]
    fn test_evaluate_split_separable() {
        let batches = vec![
            batch(&[5.0, -5.0], &[1.0, 0.0]),
            batch(&[4.0, -4.0], &[1.0, 0.0]),
        ];

        let summary = evaluate_split(&batches, &identity, &BCEWithLogitsLoss, 0.5).unwrap();
        assert_relative_eq!(summary.f1, 1.0);
        assert_relative_eq!(summary.precision, 1.0);
        assert_relative_eq!(summary.recall, 1.0);
        assert_eq!(summary.samples, 4);
        assert!(summary.loss < 0.05);
    }

    #[test]
    fn test_evaluate_split_threshold_matters() {
        // logit 0.0 maps to probability 0.5
        let batches = vec![batch(&[0.0, -3.0], &[1.0, 0.0])];

        let at_half = evaluate_split(&batches, &identity, &BCEWithLogitsLoss, 0.5).unwrap();
        assert_relative_eq!(at_half.f1, 1.0);

        let at_sixty = evaluate_split(&batches, &identity, &BCEWithLogitsLoss, 0.6).unwrap();
        assert_relative_eq!(at_sixty.f1, 0.0);
    }

    #[test]
    fn test_empty_split_is_an_error() {
        let batches: Vec<Batch> = vec![];
        let result = evaluate_split(&batches, &identity, &BCEWithLogitsLoss, 0.5);
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_outputs_pools_all_batches() {
        let batches = vec![batch(&[1.0, 2.0], &[1.0, 1.0]), batch(&[3.0], &[1.0])];

        let (probs, targets, loss) =
            collect_outputs(&batches, &identity, &BCEWithLogitsLoss).unwrap();
        assert_eq!(probs.len(), 3);
        assert_eq!(targets.len(), 3);
        assert!(loss.is_finite());
    }

    #[test]
    fn test_collect_outputs_probabilities_in_unit_interval() {
        let batches = vec![batch(&[100.0, -100.0, 0.0], &[1.0, 0.0, 1.0])];
        let (probs, _, _) = collect_outputs(&batches, &identity, &BCEWithLogitsLoss).unwrap();
        for &p in probs.data() {
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
