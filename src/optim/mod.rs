//! Optimizers and learning-rate schedules

mod adam;
mod clip;
mod optimizer;
pub mod scheduler;

pub use adam::Adam;
pub use clip::clip_grad_norm;
pub use optimizer::Optimizer;
pub use scheduler::{LRScheduler, LinearDecayLR};
