//! Info command implementation

use crate::cli::args::{InfoArgs, OutputFormat};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::load_spec;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_spec(&args.spec).map_err(|e| format!("Spec error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Run Spec Info:");
            println!();
            println!("Action unit: {} (fold {})", spec.run.au, spec.run.fold);
            println!(
                "Optimizer: Adam (lr={}, betas=({}, {}))",
                spec.optimizer.lr, spec.optimizer.beta1, spec.optimizer.beta2
            );
            println!(
                "Epochs: {} ({} decay)",
                spec.training.num_epochs, spec.training.num_epochs_decay
            );
            println!("Patience: {}", spec.training.patience);
            println!("Checkpoints: {}", spec.output.checkpoint_dir.display());

            if spec.run.flow {
                println!("Optical flow: enabled");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&spec)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
