//! Plain-text test report

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::Local;

use super::EvalSummary;
use crate::error::Result;

/// Final test-split scores for one AU and fold
#[derive(Clone, Debug)]
pub struct TestReport {
    /// Action unit identifier, e.g. "AU12"
    pub au: String,
    /// Cross-validation fold index
    pub fold: u32,
    /// Checkpoint the scores were produced from, if any
    pub checkpoint: Option<String>,
    /// Best validation F1 that selected the checkpoint
    pub val_f1: f32,
    /// Test metrics at the validation-optimal threshold
    pub summary: EvalSummary,
}

impl TestReport {
    /// Write the report as a text file
    pub fn write(&self, path: &Path) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        fs::write(path, format!("Generated: {timestamp}\n\n{self}"))?;
        Ok(())
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test report: {} fold {}", self.au, self.fold)?;
        if let Some(ckpt) = &self.checkpoint {
            writeln!(f, "Checkpoint: {ckpt}")?;
        }
        writeln!(f, "Validation F1: {:.4}", self.val_f1)?;
        writeln!(f, "Threshold: {:.4}", self.summary.threshold)?;
        writeln!(f, "Test F1: {:.4}", self.summary.f1)?;
        writeln!(f, "Test precision: {:.4}", self.summary.precision)?;
        writeln!(f, "Test recall: {:.4}", self.summary.recall)?;
        writeln!(f, "Test loss: {:.4}", self.summary.loss)?;
        writeln!(f, "Samples: {}", self.summary.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> TestReport {
        TestReport {
            au: "AU12".to_string(),
            fold: 1,
            checkpoint: Some("07_350.json".to_string()),
            val_f1: 0.61,
            summary: EvalSummary {
                loss: 0.41,
                f1: 0.58,
                precision: 0.62,
                recall: 0.55,
                threshold: 0.34,
                samples: 1200,
            },
        }
    }

    #[test]
    fn test_display_contains_key_fields() {
        let text = sample_report().to_string();
        assert!(text.contains("AU12 fold 1"));
        assert!(text.contains("Threshold: 0.3400"));
        assert!(text.contains("Test F1: 0.5800"));
        assert!(text.contains("07_350.json"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        sample_report().write(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Generated: "));
        assert!(contents.contains("Test recall: 0.5500"));
    }

    #[test]
    fn test_display_without_checkpoint() {
        let mut report = sample_report();
        report.checkpoint = None;
        assert!(!report.to_string().contains("Checkpoint:"));
    }
}
