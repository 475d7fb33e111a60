//! Training callback system
//!
//! Callbacks hook into training events (train/epoch/step begin and end,
//! validation) and can request an early stop. The trainer drives them
//! through a [`CallbackManager`].

mod manager;
mod progress;
mod scheduler;
mod traits;

pub use manager::CallbackManager;
pub use progress::ProgressCallback;
pub use scheduler::LRSchedulerCallback;
pub use traits::{CallbackAction, CallbackContext, TrainerCallback};
