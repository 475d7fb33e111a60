//! Run spec validation

use super::schema::RunSpec;
use crate::error::{Error, Result};

/// Check a parsed spec for values the trainer cannot work with
pub fn validate_spec(spec: &RunSpec) -> Result<()> {
    if spec.run.au.is_empty() {
        return Err(Error::Config("run.au must not be empty".to_string()));
    }

    if spec.optimizer.lr <= 0.0 {
        return Err(Error::Config(format!(
            "optimizer.lr must be positive, got {}",
            spec.optimizer.lr
        )));
    }
    for (name, beta) in [
        ("optimizer.beta1", spec.optimizer.beta1),
        ("optimizer.beta2", spec.optimizer.beta2),
    ] {
        if !(0.0..1.0).contains(&beta) {
            return Err(Error::Config(format!(
                "{name} must be in [0, 1), got {beta}"
            )));
        }
    }

    if spec.training.num_epochs == 0 {
        return Err(Error::Config(
            "training.num_epochs must be at least 1".to_string(),
        ));
    }
    if spec.training.num_epochs_decay > spec.training.num_epochs {
        return Err(Error::Config(format!(
            "training.num_epochs_decay ({}) cannot exceed training.num_epochs ({})",
            spec.training.num_epochs_decay, spec.training.num_epochs
        )));
    }
    if spec.training.patience == 0 {
        return Err(Error::Config(
            "training.patience must be at least 1".to_string(),
        ));
    }
    if let Some(points) = spec.training.sweep_points {
        if points == 0 {
            return Err(Error::Config(
                "training.sweep_points must be at least 1".to_string(),
            ));
        }
    }
    if let Some(clip) = spec.training.grad_clip {
        if clip <= 0.0 {
            return Err(Error::Config(format!(
                "training.grad_clip must be positive, got {clip}"
            )));
        }
    }

    Ok(())
}
