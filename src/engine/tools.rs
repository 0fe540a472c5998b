//! Path and filter utilities

use std::path::{Component, Path, PathBuf};
use walkdir::DirEntry;

use crate::RepoPath;
use crate::utils::config::GIT_DIR_NAME;

/// True when `entry` is a directory named exactly `.git` (files and symlinks named `.git` are not).
pub fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == GIT_DIR_NAME
}

/// Repository root for a `.git` directory path: the path text with the trailing `.git` trimmed,
/// separator kept (`/src/repo/.git` → `/src/repo/`). None when the path is not valid UTF-8.
pub fn repo_root_from_git_dir(git_dir: &Path) -> Option<RepoPath> {
    let s = git_dir.to_str()?;
    Some(s.strip_suffix(GIT_DIR_NAME).unwrap_or(s).to_owned())
}

/// Lexically clean a path below the walk root: `.` components are dropped, so a walk of `.`
/// reports `repo1/.git` rather than `./repo1/.git`. An all-`.` path cleans to `.`.
pub fn clean_walk_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Returns true if `path` matches any exclude pattern (by file name or full path).
pub fn is_excluded(path: &Path, exclude_patterns: &[String]) -> bool {
    if exclude_patterns.is_empty() {
        return false;
    }
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    let path_str = path.to_str().unwrap_or("");
    exclude_patterns
        .iter()
        .any(|pattern| glob_match(pattern, name) || glob_match(pattern, path_str))
}

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    glob_match_chars(&pattern, &text)
}

fn glob_match_chars(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => {
            if rest.is_empty() {
                return true; // trailing * matches everything
            }
            (0..=text.len()).any(|skip| glob_match_chars(rest, &text[skip..]))
        }
        Some(('?', rest)) => !text.is_empty() && glob_match_chars(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && glob_match_chars(rest, &text[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_root_keeps_separator() {
        assert_eq!(
            repo_root_from_git_dir(Path::new("/src/repo/.git")),
            Some("/src/repo/".to_string())
        );
        assert_eq!(
            repo_root_from_git_dir(Path::new("repo1/.git")),
            Some("repo1/".to_string())
        );
    }

    #[test]
    fn test_clean_walk_path_drops_cur_dir() {
        assert_eq!(
            clean_walk_path(Path::new("./repo1/.git")),
            PathBuf::from("repo1/.git")
        );
        assert_eq!(
            clean_walk_path(Path::new("./a/./b/.git")),
            PathBuf::from("a/b/.git")
        );
        assert_eq!(
            clean_walk_path(Path::new("/src/repo/.git")),
            PathBuf::from("/src/repo/.git")
        );
        assert_eq!(clean_walk_path(Path::new(".")), PathBuf::from("."));
    }

    #[test]
    fn test_repo_root_of_bare_git_name() {
        assert_eq!(repo_root_from_git_dir(Path::new(".git")), Some(String::new()));
    }

    #[test]
    fn test_glob_literal_and_wildcards() {
        assert!(glob_match("node_modules", "node_modules"));
        assert!(!glob_match("node_modules", "node_module"));
        assert!(glob_match("*.bak", "old.bak"));
        assert!(!glob_match("*.bak", "old.bak.txt"));
        assert!(glob_match("vendor*", "vendored"));
        assert!(glob_match("re?o", "repo"));
        assert!(!glob_match("re?o", "reo"));
        assert!(glob_match("*/archive/*", "/home/me/archive/old"));
    }

    #[test]
    fn test_is_excluded_by_name_or_path() {
        let path = PathBuf::from("/src/node_modules");
        assert!(is_excluded(&path, &["node_modules".to_string()]));
        assert!(is_excluded(&path, &["/src/*".to_string()]));
        assert!(!is_excluded(&path, &["target".to_string()]));
        assert!(!is_excluded(&path, &[]));
    }
}
