//! YAML run specification
//!
//! A run spec names the AU and fold to train, the optimizer
//! hyperparameters, and the epoch schedule. Loading goes through
//! [`load_spec`], which parses and validates in one step.

mod schema;
mod validate;

pub use schema::{OptimSpec, OutputSpec, RunSpec, RunTarget, TrainingParams};
pub use validate::validate_spec;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::optim::Adam;
use crate::train::TrainConfig;

/// Load and validate a run spec from a YAML file
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<RunSpec> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Config(format!(
            "failed to read spec file {}: {e}",
            path.as_ref().display()
        ))
    })?;

    let spec: RunSpec = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse YAML spec: {e}")))?;

    validate_spec(&spec)?;
    Ok(spec)
}

impl RunSpec {
    /// Training loop configuration derived from the spec
    pub fn train_config(&self) -> TrainConfig {
        let mut config = TrainConfig::new()
            .with_num_epochs(self.training.num_epochs)
            .with_num_epochs_decay(self.training.num_epochs_decay)
            .with_patience(self.training.patience)
            .with_log_interval(self.training.log_interval)
            .with_au(self.run.au.clone())
            .with_fold(self.run.fold)
            .with_flow(self.run.flow)
            .with_checkpoint_dir(self.output.checkpoint_dir.clone());

        if let Some(report) = &self.output.report {
            config = config.with_report_path(report.clone());
        }
        if let Some(clip) = self.training.grad_clip {
            config = config.with_grad_clip(clip);
        }
        if let Some(points) = self.training.sweep_points {
            config.sweep_points = points;
        }
        config
    }

    /// Adam optimizer configured from the spec
    pub fn optimizer(&self) -> Adam {
        Adam::new(
            self.optimizer.lr,
            self.optimizer.beta1,
            self.optimizer.beta2,
            1e-8,
        )
    }
}
