//! Checkpoint file naming and discovery
//!
//! Best-model checkpoints are named `{epoch:02}_{step}.json`, where the
//! epoch is the 1-based epoch count at save time and the step is the number
//! of training batches processed in that epoch. Resume picks the file whose
//! `(epoch, step)` pair is lexicographically greatest.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name for a checkpoint saved after `epoch` at `step`
pub fn checkpoint_file_name(epoch: usize, step: usize) -> String {
    format!("{epoch:02}_{step}.json")
}

/// Parse `(epoch, step)` from a checkpoint file stem like `07_350`
pub fn parse_checkpoint_stem(stem: &str) -> Option<(usize, usize)> {
    let (epoch, step) = stem.split_once('_')?;
    Some((epoch.parse().ok()?, step.parse().ok()?))
}

/// Most recent checkpoint in a directory, by `(epoch, step)`
///
/// Files that do not match the checkpoint naming scheme are ignored.
/// Returns `Ok(None)` when the directory has no checkpoints.
pub fn latest_checkpoint(dir: &Path) -> Result<Option<PathBuf>> {
    let mut best: Option<((usize, usize), PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(key) = parse_checkpoint_stem(stem) else {
            continue;
        };
        if best.as_ref().is_none_or(|(k, _)| key > *k) {
            best = Some((key, path));
        }
    }

    Ok(best.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_name_zero_pads_epoch() {
        assert_eq!(checkpoint_file_name(7, 350), "07_350.json");
        assert_eq!(checkpoint_file_name(12, 40), "12_40.json");
    }

    #[test]
    fn test_parse_stem() {
        assert_eq!(parse_checkpoint_stem("07_350"), Some((7, 350)));
        assert_eq!(parse_checkpoint_stem("12_40"), Some((12, 40)));
        assert_eq!(parse_checkpoint_stem("notacheckpoint"), None);
        assert_eq!(parse_checkpoint_stem("a_b"), None);
    }

    #[test]
    fn test_name_parse_round_trip() {
        let name = checkpoint_file_name(3, 99);
        let stem = name.strip_suffix(".json").unwrap();
        assert_eq!(parse_checkpoint_stem(stem), Some((3, 99)));
    }

    #[test]
    fn test_latest_checkpoint_picks_highest_epoch() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["01_350.json", "05_350.json", "03_350.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let latest = latest_checkpoint(dir.path()).unwrap().unwrap();
        assert_eq!(latest.file_name().unwrap(), "05_350.json");
    }

    #[test]
    fn test_latest_checkpoint_breaks_ties_on_step() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["02_100.json", "02_400.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let latest = latest_checkpoint(dir.path()).unwrap().unwrap();
        assert_eq!(latest.file_name().unwrap(), "02_400.json");
    }

    #[test]
    fn test_latest_checkpoint_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.txt"), "").unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        fs::write(dir.path().join("04_10.json"), "{}").unwrap();

        let latest = latest_checkpoint(dir.path()).unwrap().unwrap();
        assert_eq!(latest.file_name().unwrap(), "04_10.json");
    }

    #[test]
    fn test_latest_checkpoint_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(latest_checkpoint(dir.path()).unwrap().is_none());
    }
}
