//! Core Trainer struct and basic methods

use crate::error::{Error, Result};
use crate::io::{load_model, parse_checkpoint_stem};
use crate::optim::Optimizer;
use crate::train::callback::{CallbackContext, CallbackManager, TrainerCallback};
use crate::train::{LossFn, MetricsTracker, TrainConfig};
use crate::Tensor;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// High-level trainer that orchestrates the training loop
///
/// Owns the model parameters, optimizer, and loss function; `fit` runs the
/// full epoch loop with per-epoch validation sweeps, best-F1 checkpointing,
/// patience-based early stopping, and linear learning rate decay.
///
/// # Example
///
/// ```no_run
/// use aunet::train::{Trainer, TrainConfig, BCEWithLogitsLoss, ProgressCallback};
/// use aunet::optim::Adam;
/// use aunet::Tensor;
///
/// let params = vec![Tensor::zeros(10, true)];
/// let optimizer = Adam::new(0.0001, 0.5, 0.999, 1e-8);
/// let config = TrainConfig::default().with_au("AU12").with_fold(1);
///
/// let mut trainer = Trainer::new(params, Box::new(optimizer), config);
/// trainer.set_loss(Box::new(BCEWithLogitsLoss));
/// trainer.add_callback(ProgressCallback::default());
/// ```
pub struct Trainer {
    /// Model parameters
    pub(crate) params: Vec<Tensor>,

    /// Optimizer
    pub(crate) optimizer: Box<dyn Optimizer>,

    /// Loss function
    pub(crate) loss_fn: Option<Box<dyn LossFn>>,

    /// Training configuration
    pub(crate) config: TrainConfig,

    /// Metrics tracker
    pub metrics: MetricsTracker,

    /// Callback manager
    pub(crate) callbacks: CallbackManager,

    /// Best validation F1 achieved so far
    pub(crate) best_f1: Option<f32>,

    /// Threshold that achieved `best_f1`
    pub(crate) best_threshold: f32,

    /// Path of the best checkpoint written so far
    pub(crate) best_checkpoint: Option<PathBuf>,

    /// Epoch to resume from (0 for a fresh run)
    pub(crate) start_epoch: usize,

    /// Training start time
    pub(crate) start_time: Option<Instant>,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(params: Vec<Tensor>, optimizer: Box<dyn Optimizer>, config: TrainConfig) -> Self {
        Self {
            params,
            optimizer,
            loss_fn: None,
            config,
            metrics: MetricsTracker::new(),
            callbacks: CallbackManager::new(),
            best_f1: None,
            best_threshold: 0.5,
            best_checkpoint: None,
            start_epoch: 0,
            start_time: None,
        }
    }

    /// Set the loss function
    pub fn set_loss(&mut self, loss_fn: Box<dyn LossFn>) {
        self.loss_fn = Some(loss_fn);
    }

    /// Add a callback to the trainer
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: f32) {
        self.optimizer.set_lr(lr);
    }

    /// Get reference to model parameters
    pub fn params(&self) -> &[Tensor] {
        &self.params
    }

    /// Get mutable reference to model parameters
    pub fn params_mut(&mut self) -> &mut [Tensor] {
        &mut self.params
    }

    /// Get reference to callback manager
    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    /// Best validation F1 achieved so far
    pub fn best_f1(&self) -> Option<f32> {
        self.best_f1
    }

    /// Threshold that achieved the best validation F1
    pub fn best_threshold(&self) -> f32 {
        self.best_threshold
    }

    /// Epoch the next `fit` call starts from
    pub fn start_epoch(&self) -> usize {
        self.start_epoch
    }

    /// Restore parameters from a checkpoint and arm `fit` to resume
    ///
    /// The completed-epoch count is parsed from the checkpoint file name
    /// (`{epoch:02}_{step}.json`), falling back to the recorded metadata.
    /// The stored validation F1 and threshold seed the improvement
    /// tracking so a resumed run does not re-save a worse model.
    pub fn resume_from(&mut self, checkpoint: &Path) -> Result<usize> {
        let model = load_model(checkpoint)?;
        if model.metadata.au != self.config.au || model.metadata.fold != self.config.fold {
            return Err(Error::Checkpoint(format!(
                "checkpoint is for {} fold {}, run is {} fold {}",
                model.metadata.au, model.metadata.fold, self.config.au, self.config.fold
            )));
        }
        model.restore_into(&mut self.params)?;

        let epoch = checkpoint
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(parse_checkpoint_stem)
            .map_or(model.metadata.epoch, |(epoch, _)| epoch);

        self.start_epoch = epoch;
        self.best_f1 = Some(model.metadata.val_f1);
        self.best_threshold = model.metadata.threshold;
        self.best_checkpoint = Some(checkpoint.to_path_buf());
        Ok(epoch)
    }

    /// Build callback context from current state
    pub(crate) fn build_context(
        &self,
        epoch: usize,
        max_epochs: usize,
        step: usize,
        steps_per_epoch: usize,
        loss: f32,
        val_loss: Option<f32>,
        val_f1: Option<f32>,
    ) -> CallbackContext {
        CallbackContext {
            epoch,
            max_epochs,
            step,
            steps_per_epoch,
            global_step: self.metrics.steps,
            loss,
            lr: self.lr(),
            best_f1: self.best_f1,
            val_loss,
            val_f1,
            elapsed_secs: self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64()),
        }
    }
}
