//! End-of-training linear learning rate decay

use super::LRScheduler;
use crate::optim::Optimizer;

/// Linear decay over the final epochs of a run
///
/// Keeps the learning rate constant for the first
/// `num_epochs - num_epochs_decay` epochs, then subtracts
/// `lr_initial / num_epochs_decay` after each remaining epoch so the rate
/// ramps to zero by the end of training.
///
/// Formula: `lr_e = lr_initial * (1 - d/num_epochs_decay)` where `d` is the
/// number of completed decay epochs.
pub struct LinearDecayLR {
    lr_initial: f32,
    num_epochs: usize,
    num_epochs_decay: usize,
    current_epoch: usize,
}

impl LinearDecayLR {
    /// Create a new linear decay scheduler
    ///
    /// # Arguments
    /// * `lr_initial` - Initial learning rate
    /// * `num_epochs` - Total epochs planned for the run
    /// * `num_epochs_decay` - Number of trailing epochs over which to decay
    pub fn new(lr_initial: f32, num_epochs: usize, num_epochs_decay: usize) -> Self {
        Self {
            lr_initial,
            num_epochs,
            num_epochs_decay,
            current_epoch: 0,
        }
    }

    /// Fast-forward to a given completed-epoch count (checkpoint resume)
    pub fn set_epoch(&mut self, epoch: usize) {
        self.current_epoch = epoch;
    }

    /// Apply the current learning rate to an optimizer
    pub fn apply<O: Optimizer + ?Sized>(&self, optimizer: &mut O) {
        optimizer.set_lr(self.get_lr());
    }
}

impl LRScheduler for LinearDecayLR {
    fn get_lr(&self) -> f32 {
        if self.num_epochs_decay == 0 {
            return self.lr_initial;
        }
        let decay_start = self.num_epochs.saturating_sub(self.num_epochs_decay);
        let decayed = self.current_epoch.saturating_sub(decay_start);
        let factor = 1.0 - (decayed as f32 / self.num_epochs_decay as f32);
        self.lr_initial * factor.max(0.0)
    }

    fn step(&mut self) {
        self.current_epoch += 1;
    }
}
