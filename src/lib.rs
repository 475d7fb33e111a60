//! aunet: per-AU facial action unit classifier training
//!
//! Trains one binary-ish multi-label classifier per facial action unit
//! with BCE-with-logits loss, per-epoch validation with an F1 threshold
//! sweep, best-model checkpointing, patience-based early stopping, and
//! linear end-of-run learning-rate decay.
//!
//! # Quick Start
//!
//! ```no_run
//! use aunet::optim::Adam;
//! use aunet::train::{BCEWithLogitsLoss, Batch, TrainConfig, Trainer};
//! use aunet::Tensor;
//!
//! # fn batches() -> Vec<Batch> { Vec::new() }
//! let params = vec![Tensor::zeros(8, true)];
//! let optimizer = Adam::new(1e-4, 0.5, 0.999, 1e-8);
//! let config = TrainConfig::new()
//!     .with_num_epochs(25)
//!     .with_patience(4)
//!     .with_au("AU12".to_string());
//!
//! let mut trainer = Trainer::new(params, Box::new(optimizer), config);
//! trainer.set_loss(Box::new(BCEWithLogitsLoss));
//!
//! let result = trainer.fit(batches, batches, |inputs, _flow| inputs.clone())?;
//! println!("best F1 {:.4} at threshold {:.4}", result.best_f1, result.best_threshold);
//! # Ok::<(), aunet::Error>(())
//! ```

pub mod autograd;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod io;
pub mod optim;
pub mod train;

pub use autograd::Tensor;
pub use error::{Error, Result};
