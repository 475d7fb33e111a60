//! Training result types

use std::path::PathBuf;

/// Result of a training run
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Total completed epochs, including any resumed ones
    pub final_epoch: usize,
    /// Final epoch's mean training loss
    pub final_loss: f32,
    /// Best validation F1 achieved
    pub best_f1: f32,
    /// Threshold achieving the best validation F1
    pub best_threshold: f32,
    /// Checkpoint saved for the best epoch, if checkpointing was enabled
    pub best_checkpoint: Option<PathBuf>,
    /// Whether training was stopped before the planned epoch count
    pub stopped_early: bool,
    /// Learning rate after the final decay step
    pub final_lr: f32,
    /// Total training time in seconds
    pub elapsed_secs: f64,
}
