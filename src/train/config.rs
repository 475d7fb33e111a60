//! Training configuration and metrics tracking

use std::path::PathBuf;

/// Training loop configuration
#[derive(Clone, Debug)]
pub struct TrainConfig {
    /// Total epochs planned
    pub num_epochs: usize,
    /// Trailing epochs over which the learning rate decays linearly to zero
    pub num_epochs_decay: usize,
    /// Consecutive non-improving epochs tolerated before stopping
    pub patience: usize,
    /// Log training loss every N steps
    pub log_interval: usize,
    /// Maximum gradient norm (None = no clipping)
    pub max_grad_norm: Option<f32>,
    /// Directory for best-model checkpoints (None = no checkpointing)
    pub checkpoint_dir: Option<PathBuf>,
    /// Explicit test report path (None = next to the checkpoints)
    pub report_path: Option<PathBuf>,
    /// Number of points in the validation threshold sweep
    pub sweep_points: usize,
    /// Action unit this run trains, e.g. "AU12"
    pub au: String,
    /// Cross-validation fold index
    pub fold: u32,
    /// Whether the optical flow stream is enabled
    pub flow: bool,
}

impl TrainConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of epochs
    pub fn with_num_epochs(mut self, epochs: usize) -> Self {
        self.num_epochs = epochs;
        self
    }

    /// Set the number of trailing decay epochs
    pub fn with_num_epochs_decay(mut self, epochs: usize) -> Self {
        self.num_epochs_decay = epochs;
        self
    }

    /// Set the early-stopping patience
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Set the step logging interval
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Enable gradient clipping
    pub fn with_grad_clip(mut self, max_norm: f32) -> Self {
        self.max_grad_norm = Some(max_norm);
        self
    }

    /// Set the checkpoint directory
    pub fn with_checkpoint_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.checkpoint_dir = Some(dir.into());
        self
    }

    /// Set an explicit test report path
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Set the action unit identifier
    pub fn with_au(mut self, au: impl Into<String>) -> Self {
        self.au = au.into();
        self
    }

    /// Set the cross-validation fold
    pub fn with_fold(mut self, fold: u32) -> Self {
        self.fold = fold;
        self
    }

    /// Enable the optical flow stream
    pub fn with_flow(mut self, flow: bool) -> Self {
        self.flow = flow;
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_epochs: 30,
            num_epochs_decay: 10,
            patience: 5,
            log_interval: 100,
            max_grad_norm: None,
            checkpoint_dir: None,
            report_path: None,
            sweep_points: 200,
            au: "AU1".to_string(),
            fold: 0,
            flow: false,
        }
    }
}

/// Running metrics collected over a training run
#[derive(Clone, Debug, Default)]
pub struct MetricsTracker {
    /// Mean training loss per epoch
    pub losses: Vec<f32>,
    /// Validation loss per evaluation
    pub val_losses: Vec<f32>,
    /// Best sweep F1 per evaluation
    pub val_f1: Vec<f32>,
    /// Learning rate per epoch
    pub lrs: Vec<f32>,
    /// Global step counter
    pub steps: usize,
    /// Completed epochs
    pub epoch: usize,
}

impl MetricsTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one training step
    pub fn increment_step(&mut self) {
        self.steps += 1;
    }

    /// Record the end of an epoch
    pub fn record_epoch(&mut self, loss: f32, lr: f32) {
        self.losses.push(loss);
        self.lrs.push(lr);
        self.epoch += 1;
    }

    /// Record a validation pass
    pub fn record_val(&mut self, loss: f32, f1: f32) {
        self.val_losses.push(loss);
        self.val_f1.push(f1);
    }

    /// Best validation F1 recorded so far
    pub fn best_val_f1(&self) -> Option<f32> {
        self.val_f1
            .iter()
            .copied()
            .fold(None, |best, f1| match best {
                Some(b) if b >= f1 => Some(b),
                _ => Some(f1),
            })
    }
}
