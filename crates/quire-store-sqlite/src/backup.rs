//! Backup-generation naming and rotation.
//!
//! Generation filenames embed a zero-padded UTC timestamp
//! (`papers_auto_<YYYYMMDD_HHMMSS>.db`), so a plain lexicographic sort of
//! the filenames is the recency order and rotation never parses dates.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

const GENERATION_PREFIX: &str = "papers_auto_";
const GENERATION_SUFFIX: &str = ".db";

/// Filename for a generation written at `at`.
pub fn generation_file_name(at: DateTime<Utc>) -> String {
  format!("{GENERATION_PREFIX}{}{GENERATION_SUFFIX}", at.format("%Y%m%d_%H%M%S"))
}

fn is_generation_name(name: &str) -> bool {
  name.starts_with(GENERATION_PREFIX) && name.ends_with(GENERATION_SUFFIX)
}

/// Delete the oldest generation files in `dir` beyond `max_generations`,
/// keeping the lexicographically (= chronologically) greatest. Files not
/// matching the generation naming scheme are left alone. Returns the paths
/// removed.
pub fn prune_generations(
  dir: &Path,
  max_generations: usize,
) -> std::io::Result<Vec<PathBuf>> {
  let mut generations: Vec<PathBuf> = std::fs::read_dir(dir)?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| {
      path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_generation_name)
    })
    .collect();

  generations.sort();

  let excess = generations.len().saturating_sub(max_generations);
  let mut removed = Vec::with_capacity(excess);
  for path in generations.drain(..excess) {
    std::fs::remove_file(&path)?;
    removed.push(path);
  }
  Ok(removed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn seed(dir: &Path, names: &[&str]) {
    for name in names {
      std::fs::write(dir.join(name), b"x").unwrap();
    }
  }

  fn remaining(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }

  #[test]
  fn prune_keeps_newest_generations() {
    let dir = tempfile::tempdir().unwrap();
    seed(
      dir.path(),
      &[
        "papers_auto_20250101_000001.db",
        "papers_auto_20250101_000002.db",
        "papers_auto_20250102_120000.db",
        "papers_auto_20250103_080000.db",
        "papers_auto_20250110_235959.db",
        "papers_auto_20250111_000000.db",
        "papers_auto_20250201_000000.db",
      ],
    );

    let removed = prune_generations(dir.path(), 5).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(
      remaining(dir.path()),
      vec![
        "papers_auto_20250102_120000.db",
        "papers_auto_20250103_080000.db",
        "papers_auto_20250110_235959.db",
        "papers_auto_20250111_000000.db",
        "papers_auto_20250201_000000.db",
      ]
    );
  }

  #[test]
  fn prune_ignores_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    seed(
      dir.path(),
      &[
        "papers_auto_20250101_000001.db",
        "papers_auto_20250101_000002.db",
        "manual_backup.db",
        "notes.txt",
      ],
    );

    prune_generations(dir.path(), 1).unwrap();
    assert_eq!(
      remaining(dir.path()),
      vec!["manual_backup.db", "notes.txt", "papers_auto_20250101_000002.db"]
    );
  }

  #[test]
  fn prune_below_limit_removes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), &["papers_auto_20250101_000001.db"]);
    let removed = prune_generations(dir.path(), 5).unwrap();
    assert!(removed.is_empty());
  }

  #[test]
  fn generation_names_sort_chronologically() {
    let a = "papers_auto_20241231_235959.db";
    let b = "papers_auto_20250101_000000.db";
    assert!(a < b);
  }
}
