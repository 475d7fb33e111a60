//! Validate command implementation

use crate::cli::args::ValidateArgs;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_spec, RunSpec};

/// Format the run target as a string
pub fn format_run_info(spec: &RunSpec) -> String {
    let mut lines = vec![
        format!("  Action unit: {}", spec.run.au),
        format!("  Fold: {}", spec.run.fold),
    ];
    if spec.run.flow {
        lines.push("  Optical flow: enabled".to_string());
    }
    lines.join("\n")
}

/// Format optimizer hyperparameters as a string
pub fn format_optimizer_info(spec: &RunSpec) -> String {
    format!(
        "  Optimizer: Adam\n  Learning rate: {}\n  Betas: ({}, {})",
        spec.optimizer.lr, spec.optimizer.beta1, spec.optimizer.beta2
    )
}

/// Format the epoch schedule as a string
pub fn format_training_info(spec: &RunSpec) -> String {
    let mut lines = vec![
        format!("  Epochs: {}", spec.training.num_epochs),
        format!("  Decay epochs: {}", spec.training.num_epochs_decay),
        format!("  Patience: {}", spec.training.patience),
    ];
    if let Some(clip) = spec.training.grad_clip {
        lines.push(format!("  Gradient clipping: {clip}"));
    }
    if let Some(points) = spec.training.sweep_points {
        lines.push(format!("  Threshold sweep points: {points}"));
    }
    lines.join("\n")
}

/// Format output locations as a string
pub fn format_output_info(spec: &RunSpec) -> String {
    let mut lines = vec![format!(
        "  Checkpoint dir: {}",
        spec.output.checkpoint_dir.display()
    )];
    if let Some(report) = &spec.output.report {
        lines.push(format!("  Report: {}", report.display()));
    }
    lines.join("\n")
}

/// Print detailed spec summary
pub fn print_detailed_summary(spec: &RunSpec) {
    println!();
    println!("Run Spec Summary:");
    println!("{}", format_run_info(spec));
    println!();
    println!("{}", format_optimizer_info(spec));
    println!();
    println!("{}", format_training_info(spec));
    println!();
    println!("{}", format_output_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating spec: {}", args.spec.display()),
    );

    // load_spec validates after parsing
    let spec = load_spec(&args.spec).map_err(|e| format!("Spec error: {e}"))?;

    log(level, LogLevel::Normal, "Run spec is valid");

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OptimSpec, OutputSpec, RunTarget, TrainingParams};
    use std::io::Write;
    use std::path::PathBuf;

    fn make_test_spec() -> RunSpec {
        RunSpec {
            run: RunTarget {
                au: "AU12".to_string(),
                fold: 1,
                flow: true,
            },
            optimizer: OptimSpec::default(),
            training: TrainingParams {
                grad_clip: Some(5.0),
                ..Default::default()
            },
            output: OutputSpec {
                checkpoint_dir: PathBuf::from("ckpt/au12"),
                report: Some(PathBuf::from("report.txt")),
            },
        }
    }

    #[test]
    fn test_format_run_info() {
        let info = format_run_info(&make_test_spec());
        assert!(info.contains("AU12"));
        assert!(info.contains("Fold: 1"));
        assert!(info.contains("Optical flow"));
    }

    #[test]
    fn test_format_run_info_without_flow() {
        let mut spec = make_test_spec();
        spec.run.flow = false;
        assert!(!format_run_info(&spec).contains("Optical flow"));
    }

    #[test]
    fn test_format_training_info() {
        let info = format_training_info(&make_test_spec());
        assert!(info.contains("Epochs: 30"));
        assert!(info.contains("Gradient clipping: 5"));
    }

    #[test]
    fn test_format_output_info() {
        let info = format_output_info(&make_test_spec());
        assert!(info.contains("ckpt/au12"));
        assert!(info.contains("report.txt"));
    }

    #[test]
    fn test_run_validate_accepts_valid_spec() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"run:\n  au: AU6\noutput:\n  checkpoint_dir: ckpt\n")
            .unwrap();

        let args = ValidateArgs {
            spec: file.path().to_path_buf(),
            detailed: false,
        };
        assert!(run_validate(args, LogLevel::Quiet).is_ok());
    }

    #[test]
    fn test_run_validate_rejects_missing_file() {
        let args = ValidateArgs {
            spec: PathBuf::from("no_such_spec.yaml"),
            detailed: false,
        };
        assert!(run_validate(args, LogLevel::Quiet).is_err());
    }
}
