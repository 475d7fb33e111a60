//! Binary cross-entropy with logits for multi-label AU classification
//!
//! Each AU is an independent binary decision, so a face can activate several
//! units at once; the targets are multi-hot vectors. Combining the sigmoid
//! with the loss keeps the computation numerically stable:
//!
//! ```text
//! L_i = max(x_i, 0) - x_i * t_i + log(1 + exp(-|x_i|))
//! L   = mean(L_i)
//! ```
//!
//! Gradient: `∂L/∂x_i = (σ(x_i) - t_i) / N`

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array1;

use super::LossFn;
use crate::autograd::BackwardOp;
use crate::Tensor;

/// Binary cross-entropy with logits
///
/// # Example
///
/// ```
/// use aunet::train::{BCEWithLogitsLoss, LossFn};
/// use aunet::Tensor;
///
/// let loss_fn = BCEWithLogitsLoss;
/// let logits = Tensor::from_vec(vec![2.0, -1.0, 0.5], true);
/// let targets = Tensor::from_vec(vec![1.0, 0.0, 1.0], false);
///
/// let loss = loss_fn.forward(&logits, &targets);
/// assert!(loss.data()[0] > 0.0);
/// ```
pub struct BCEWithLogitsLoss;

impl BCEWithLogitsLoss {
    /// Elementwise numerically stable sigmoid
    pub(crate) fn sigmoid(x: &Array1<f32>) -> Array1<f32> {
        x.mapv(|v| {
            if v >= 0.0 {
                1.0 / (1.0 + (-v).exp())
            } else {
                let e = v.exp();
                e / (1.0 + e)
            }
        })
    }

    /// Stable per-element BCE: max(x, 0) - x*t + log(1 + exp(-|x|))
    fn stable_bce(logit: f32, target: f32) -> f32 {
        logit.max(0.0) - logit * target + (1.0 + (-logit.abs()).exp()).ln()
    }
}

struct BceBackward {
    pred_grad_cell: Rc<RefCell<Option<Array1<f32>>>>,
    grad: Array1<f32>,
}

impl BackwardOp for BceBackward {
    fn backward(&self) {
        let mut pred_grad = self.pred_grad_cell.borrow_mut();
        match pred_grad.as_mut() {
            Some(existing) => *existing = &*existing + &self.grad,
            None => *pred_grad = Some(self.grad.clone()),
        }
    }
}

impl LossFn for BCEWithLogitsLoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );

        let n = predictions.len() as f32;
        let total: f32 = predictions
            .data()
            .iter()
            .zip(targets.data().iter())
            .map(|(&logit, &target)| Self::stable_bce(logit, target))
            .sum();

        let mut loss = Tensor::from_vec(vec![total / n], true);

        if predictions.requires_grad() {
            let sigmoid = Self::sigmoid(predictions.data());
            let grad = (&sigmoid - targets.data()) / n;
            loss.set_backward_op(Rc::new(BceBackward {
                pred_grad_cell: predictions.grad_cell(),
                grad,
            }));
        }

        loss
    }

    fn name(&self) -> &'static str {
        "BCEWithLogits"
    }
}
