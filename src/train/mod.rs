//! Training loop for multi-label AU classification
//!
//! This module provides the epoch loop and its bookkeeping:
//! - BCE-with-logits loss for multi-hot AU targets
//! - Threshold-based classification metrics (Precision, Recall, F1)
//! - Trainer abstraction with per-epoch threshold-sweep validation
//! - Best-F1 checkpointing and early stopping
//! - End-of-training linear learning-rate decay
//!
//! # Example
//!
//! ```no_run
//! use aunet::train::{Trainer, TrainConfig};
//! use aunet::optim::Adam;
//! use aunet::Tensor;
//!
//! let params = vec![Tensor::zeros(8, true)];
//! let optimizer = Adam::new(1e-4, 0.5, 0.999, 1e-8);
//! let config = TrainConfig::new().with_num_epochs(25).with_patience(4);
//!
//! let mut trainer = Trainer::new(params, Box::new(optimizer), config);
//!
//! // let result = trainer.fit(|| train_batches.clone(), || val_batches.clone(),
//! //                          |x, _flow| forward(x))?;
//! ```

mod batch;
pub mod callback;
mod config;
pub mod loss;
pub mod metrics;
mod stopping;
mod trainer;

pub use batch::Batch;
pub use callback::{
    CallbackAction, CallbackContext, CallbackManager, LRSchedulerCallback, ProgressCallback,
    TrainerCallback,
};
pub use config::{MetricsTracker, TrainConfig};
pub use loss::{BCEWithLogitsLoss, LossFn};
pub use metrics::{F1Score, Metric, Precision, Recall};
pub use stopping::{EarlyStopping, StopDecision};
pub use trainer::{FitResult, Trainer};
