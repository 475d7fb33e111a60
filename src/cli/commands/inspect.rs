//! Inspect command implementation

use std::path::{Path, PathBuf};

use crate::cli::args::InspectArgs;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::io::{latest_checkpoint, load_model, Model};

/// Resolve the checkpoint to inspect: a file directly, or the most
/// recent checkpoint when given a directory
fn resolve_checkpoint(path: &Path) -> Result<PathBuf, String> {
    if path.is_dir() {
        latest_checkpoint(path)
            .map_err(|e| format!("Failed to scan {}: {e}", path.display()))?
            .ok_or_else(|| format!("No checkpoints found in {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn log_model_info(level: LogLevel, model: &Model) {
    let meta = &model.metadata;
    log(
        level,
        LogLevel::Normal,
        &format!("Action unit: {} (fold {})", meta.au, meta.fold),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Saved at: epoch {}, step {}", meta.epoch, meta.step),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Validation F1: {:.4} (threshold {:.4})",
            meta.val_f1, meta.threshold
        ),
    );
    if meta.flow {
        log(level, LogLevel::Normal, "Optical flow: enabled");
    }

    let total: usize = model.parameters.iter().map(|(_, t)| t.data().len()).sum();
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Parameters: {} tensors, {} values",
            model.parameters.len(),
            total
        ),
    );
}

fn log_parameter_details(level: LogLevel, model: &Model) {
    log(level, LogLevel::Verbose, "\nParameter details:");
    for (name, tensor) in &model.parameters {
        log(
            level,
            LogLevel::Verbose,
            &format!("  {name}: len={}", tensor.data().len()),
        );
    }
}

pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    let path = resolve_checkpoint(&args.path)?;

    log(
        level,
        LogLevel::Normal,
        &format!("Inspecting checkpoint: {}", path.display()),
    );

    let model = load_model(&path).map_err(|e| format!("Checkpoint error: {e}"))?;

    log_model_info(level, &model);

    if level == LogLevel::Verbose {
        log_parameter_details(level, &model);
    }

    Ok(())
}
