use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::{PackagePaths, TEMP_SUFFIX};

/// Temp path next to the cache file (same directory, so the rename stays on one filesystem).
pub fn temp_path_for(cache_file: &Path) -> PathBuf {
    let name = cache_file
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .unwrap_or_else(|| format!(".{}", PackagePaths::get().pkg_name()));
    cache_file
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.{TEMP_SUFFIX}"))
}

/// Remove a temp file left behind by an interrupted run. Missing is fine.
pub fn remove_stale_temp(temp_path: &Path) -> Result<()> {
    match fs::remove_file(temp_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e)
            .with_context(|| format!("remove stale temp cache at {}", temp_path.display())),
    }
}

pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "atomic rename temp cache to final path ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_same_dir() {
        assert_eq!(
            temp_path_for(Path::new("/home/me/.cache/cdg")),
            PathBuf::from("/home/me/.cache/cdg.tmp")
        );
    }

    #[test]
    fn test_temp_path_bare_filename() {
        assert_eq!(
            temp_path_for(Path::new("repos.cache")),
            PathBuf::from("repos.cache.tmp")
        );
    }

    #[test]
    fn test_remove_stale_temp_missing_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_stale_temp(&dir.path().join("absent.tmp")).is_ok());
    }
}
