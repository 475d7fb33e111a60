//! Training step operations

use super::core::Trainer;
use crate::optim::clip_grad_norm;
use crate::train::Batch;
use crate::Tensor;

impl Trainer {
    /// Perform a single training step
    ///
    /// Zeroes gradients, runs the forward closure on the batch (with the
    /// optical flow stream when the batch carries one), computes the loss,
    /// backpropagates, optionally clips, and applies the optimizer.
    ///
    /// # Returns
    ///
    /// Scalar loss value for this batch
    pub fn train_step<F>(&mut self, batch: &Batch, forward_fn: F) -> f32
    where
        F: FnOnce(&Tensor, Option<&Tensor>) -> Tensor,
    {
        assert!(
            self.loss_fn.is_some(),
            "Loss function must be set before training"
        );

        // Zero gradients
        self.optimizer.zero_grad(&mut self.params);

        // Forward pass
        let predictions = forward_fn(&batch.inputs, batch.flow.as_ref());

        // Compute loss
        let loss = self
            .loss_fn
            .as_ref()
            .unwrap()
            .forward(&predictions, &batch.targets);

        let loss_val = loss.data()[0];

        // Backward pass
        if let Some(backward_op) = loss.backward_op() {
            backward_op.backward();
        }

        // Gradient clipping
        if let Some(max_norm) = self.config.max_grad_norm {
            clip_grad_norm(&mut self.params, max_norm);
        }

        // Optimizer step
        self.optimizer.step(&mut self.params);

        // Update metrics
        self.metrics.increment_step();

        loss_val
    }
}

#[cfg(test)]
mod tests {
    use crate::optim::Adam;
    use crate::train::{BCEWithLogitsLoss, Batch, TrainConfig, Trainer};
    use crate::Tensor;

    #[test]
    fn test_train_step_reduces_loss() {
        // The parameters are the logits: cloning a parameter shares its
        // gradient cell, so the loss gradient lands on the parameter
        let params = vec![Tensor::from_vec(vec![0.0, 0.0, 0.0], true)];
        let optimizer = Adam::new(0.1, 0.9, 0.999, 1e-8);

        let mut trainer = Trainer::new(params, Box::new(optimizer), TrainConfig::default());
        trainer.set_loss(Box::new(BCEWithLogitsLoss));

        let batch = Batch::new(
            Tensor::zeros(3, false),
            Tensor::from_vec(vec![1.0, 0.0, 1.0], false),
        );

        let mut losses = Vec::new();
        for _ in 0..20 {
            let logits = trainer.params()[0].clone();
            let loss = trainer.train_step(&batch, move |_, _| logits);
            losses.push(loss);
        }

        assert!(losses.last().unwrap() < losses.first().unwrap());
        assert_eq!(trainer.metrics.steps, 20);
    }

    #[test]
    fn test_train_step_counts_steps() {
        let params = vec![Tensor::from_vec(vec![0.5], true)];
        let optimizer = Adam::new(0.01, 0.9, 0.999, 1e-8);

        let mut trainer = Trainer::new(params, Box::new(optimizer), TrainConfig::default());
        trainer.set_loss(Box::new(BCEWithLogitsLoss));

        let batch = Batch::new(
            Tensor::from_vec(vec![1.0], false),
            Tensor::from_vec(vec![1.0], false),
        );

        let loss = trainer.train_step(&batch, |inputs, _| inputs.clone());
        assert!(loss > 0.0);
        assert!(loss.is_finite());
        assert_eq!(trainer.metrics.steps, 1);
    }

    #[test]
    #[should_panic(expected = "Loss function must be set")]
    fn test_train_step_without_loss() {
        let params = vec![Tensor::zeros(10, true)];
        let optimizer = Adam::new(0.001, 0.9, 0.999, 1e-8);

        let mut trainer = Trainer::new(params, Box::new(optimizer), TrainConfig::default());
        let batch = Batch::new(Tensor::zeros(10, false), Tensor::zeros(10, false));
        trainer.train_step(&batch, |inputs, _| inputs.clone());
    }
}
