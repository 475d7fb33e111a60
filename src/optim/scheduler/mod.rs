//! Learning rate schedulers

mod linear_decay;

pub use linear_decay::LinearDecayLR;

/// Learning rate scheduler trait
pub trait LRScheduler {
    /// Get the current learning rate
    fn get_lr(&self) -> f32;

    /// Step the scheduler (called after each epoch)
    fn step(&mut self);
}
