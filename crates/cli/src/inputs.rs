//! Input discovery and backup bookkeeping
//!
//! Inputs are dropped into `data/` under a handful of conventional
//! names; resolution is just a prioritized list of candidates tried in
//! order. After a fully successful run the consumed inputs are renamed
//! into a backup directory so a re-run does not double-process them.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// First existing path among `candidates`, or `None`.
pub fn first_existing<'a, I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a str>,
{
    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            debug!("resolved input: {:?}", path);
            return Some(path.to_path_buf());
        }
    }
    None
}

/// Rename `input` to `<backup_dir>/<file name>.backup`, creating the
/// backup directory as needed. Returns the backup location.
pub fn backup_input(input: &Path, backup_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create backup dir: {}", backup_dir.display()))?;

    let name = input
        .file_name()
        .with_context(|| format!("Input path has no file name: {}", input.display()))?;
    let mut backup_name = name.to_os_string();
    backup_name.push(".backup");
    let dest = backup_dir.join(backup_name);

    fs::rename(input, &dest)
        .with_context(|| format!("Failed to back up {} to {}", input.display(), dest.display()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_existing_respects_priority() {
        let dir = tempfile::tempdir().unwrap();
        let lower = dir.path().join("lower.txt");
        let higher = dir.path().join("higher.csv");
        fs::write(&lower, "x").unwrap();
        fs::write(&higher, "x").unwrap();

        let candidates = [
            dir.path().join("missing.csv"),
            higher.clone(),
            lower.clone(),
        ];
        let candidate_strs: Vec<String> = candidates
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        let found = first_existing(candidate_strs.iter().map(String::as_str)).unwrap();
        assert_eq!(found, higher);
    }

    #[test]
    fn test_first_existing_none_when_all_missing() {
        assert_eq!(first_existing(["nope.txt", "also/nope.csv"]), None);
    }

    #[test]
    fn test_backup_renames_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("yahoo_answers.csv");
        fs::write(&input, "raw data").unwrap();
        let backup_dir = dir.path().join("original");

        let dest = backup_input(&input, &backup_dir).unwrap();

        assert_eq!(dest, backup_dir.join("yahoo_answers.csv.backup"));
        assert!(!input.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "raw data");
    }
}
