//! High-level training orchestration

mod core;
mod fit;
mod result;
mod step;

pub use core::Trainer;
pub use result::FitResult;
