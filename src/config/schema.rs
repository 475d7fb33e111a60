//! YAML schema definitions for run specifications

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete run specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    /// What to train: AU, fold, and input streams
    pub run: RunTarget,

    /// Optimizer hyperparameters
    #[serde(default)]
    pub optimizer: OptimSpec,

    /// Epoch schedule and stopping criteria
    #[serde(default)]
    pub training: TrainingParams,

    /// Output locations
    pub output: OutputSpec,
}

/// Target of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTarget {
    /// Action unit identifier, e.g. "AU12"
    pub au: String,

    /// Cross-validation fold index
    #[serde(default)]
    pub fold: u32,

    /// Enable the optical flow input stream
    #[serde(default)]
    pub flow: bool,
}

/// Adam hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Learning rate
    #[serde(default = "default_lr")]
    pub lr: f32,

    /// First moment decay
    #[serde(default = "default_beta1")]
    pub beta1: f32,

    /// Second moment decay
    #[serde(default = "default_beta2")]
    pub beta2: f32,
}

fn default_lr() -> f32 {
    1e-4
}

fn default_beta1() -> f32 {
    0.5
}

fn default_beta2() -> f32 {
    0.999
}

impl Default for OptimSpec {
    fn default() -> Self {
        Self {
            lr: default_lr(),
            beta1: default_beta1(),
            beta2: default_beta2(),
        }
    }
}

/// Epoch schedule and stopping criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Total epochs planned
    #[serde(default = "default_num_epochs")]
    pub num_epochs: usize,

    /// Trailing epochs over which the learning rate decays to zero
    #[serde(default = "default_num_epochs_decay")]
    pub num_epochs_decay: usize,

    /// Consecutive non-improving epochs tolerated before stopping
    #[serde(default = "default_patience")]
    pub patience: usize,

    /// Log training loss every N steps
    #[serde(default = "default_log_interval")]
    pub log_interval: usize,

    /// Maximum gradient norm (absent = no clipping)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grad_clip: Option<f32>,

    /// Points in the validation threshold sweep (absent = 200)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep_points: Option<usize>,
}

fn default_num_epochs() -> usize {
    30
}

fn default_num_epochs_decay() -> usize {
    10
}

fn default_patience() -> usize {
    5
}

fn default_log_interval() -> usize {
    100
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            num_epochs: default_num_epochs(),
            num_epochs_decay: default_num_epochs_decay(),
            patience: default_patience(),
            log_interval: default_log_interval(),
            grad_clip: None,
            sweep_points: None,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Directory for best-model checkpoints
    pub checkpoint_dir: PathBuf,

    /// Optional path for the final test report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_spec_parses_with_defaults() {
        let yaml = "\
run:
  au: AU6
output:
  checkpoint_dir: ckpt
";
        let spec: RunSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.run.au, "AU6");
        assert_eq!(spec.run.fold, 0);
        assert!(!spec.run.flow);
        assert_eq!(spec.optimizer.lr, 1e-4);
        assert_eq!(spec.training.num_epochs, 30);
        assert_eq!(spec.training.patience, 5);
        assert!(spec.training.grad_clip.is_none());
        assert!(spec.output.report.is_none());
    }

    #[test]
    fn test_spec_round_trip() {
        let spec = RunSpec {
            run: RunTarget {
                au: "AU17".to_string(),
                fold: 1,
                flow: true,
            },
            optimizer: OptimSpec::default(),
            training: TrainingParams {
                grad_clip: Some(1.0),
                ..Default::default()
            },
            output: OutputSpec {
                checkpoint_dir: PathBuf::from("out"),
                report: Some(PathBuf::from("report.txt")),
            },
        };

        let yaml = serde_yaml::to_string(&spec).unwrap();
        let parsed: RunSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.run.au, "AU17");
        assert_eq!(parsed.training.grad_clip, Some(1.0));
        assert_eq!(parsed.output.report, Some(PathBuf::from("report.txt")));
    }

    #[test]
    fn test_missing_run_section_fails() {
        let yaml = "output:\n  checkpoint_dir: ckpt\n";
        assert!(serde_yaml::from_str::<RunSpec>(yaml).is_err());
    }
}
