//! Cache file: one repository root per line, UTF-8, newline-terminated, owner read/write only.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::RepoPath;
use crate::utils::{remove_stale_temp, rename_temp_to_final, temp_path_for};

/// Join `lines` with a trailing newline after each (empty input gives empty output).
pub fn serialize_lines(lines: &[RepoPath]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Split cache content into lines. Blank lines are kept; a final newline does not add an entry.
pub fn parse_lines(content: &str) -> Vec<RepoPath> {
    content.lines().map(str::to_owned).collect()
}

/// Replace `cache_file` with `lines`. Written to a temp file (mode 0600) and renamed into
/// place, so the previous cache survives any failure.
pub fn write_cache(cache_file: &Path, lines: &[RepoPath]) -> Result<()> {
    let temp_path = temp_path_for(cache_file);
    remove_stale_temp(&temp_path)?;
    let result = write_owner_only(&temp_path, serialize_lines(lines).as_bytes())
        .and_then(|()| rename_temp_to_final(&temp_path, cache_file));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_owner_only(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("create cache file {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("write cache file {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("sync cache file {}", path.display()))?;
    Ok(())
}

/// Read the whole cache into lines, in file order.
pub fn read_cache(cache_file: &Path) -> Result<Vec<RepoPath>> {
    let content = fs::read_to_string(cache_file)
        .with_context(|| format!("read cache file {}", cache_file.display()))?;
    Ok(parse_lines(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<RepoPath> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_serialize_newline_terminated() {
        assert_eq!(serialize_lines(&lines(&["/a/", "/b/"])), "/a/\n/b/\n");
        assert_eq!(serialize_lines(&[]), "");
    }

    #[test]
    fn test_parse_keeps_blank_lines() {
        assert_eq!(parse_lines("/a\n\n/c\n"), lines(&["/a", "", "/c"]));
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        assert_eq!(parse_lines("/a\n/b"), lines(&["/a", "/b"]));
    }

    #[test]
    fn test_parse_strips_crlf() {
        assert_eq!(parse_lines("/a\r\n/b\r\n"), lines(&["/a", "/b"]));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_lines("").is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("repos");
        let found = lines(&["/src/one/", "/src/two/sub/"]);
        write_cache(&cache, &found).unwrap();
        assert_eq!(
            fs::read_to_string(&cache).unwrap(),
            "/src/one/\n/src/two/sub/\n"
        );
        assert_eq!(read_cache(&cache).unwrap(), found);
        assert!(!temp_path_for(&cache).exists());
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("repos");
        write_cache(&cache, &lines(&["/old/1/", "/old/2/", "/old/3/"])).unwrap();
        write_cache(&cache, &lines(&["/new/"])).unwrap();
        assert_eq!(fs::read_to_string(&cache).unwrap(), "/new/\n");
    }

    #[test]
    fn test_write_clears_stale_temp() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("repos");
        fs::write(temp_path_for(&cache), "partial").unwrap();
        write_cache(&cache, &lines(&["/a/"])).unwrap();
        assert_eq!(fs::read_to_string(&cache).unwrap(), "/a/\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("repos");
        write_cache(&cache, &lines(&["/a/"])).unwrap();
        let mode = fs::metadata(&cache).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("no/such/dir/repos");
        assert!(write_cache(&cache, &lines(&["/a/"])).is_err());
        assert!(!cache.exists());
    }

    #[test]
    fn test_read_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_cache(&dir.path().join("absent")).is_err());
    }
}
