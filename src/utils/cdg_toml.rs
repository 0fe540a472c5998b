//! Load `.cdg.toml` (CLI only). Lib callers build [`Opts`] themselves.

use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CdgToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    root_path: Option<String>,
    cache_file: Option<String>,
    follow_links: Option<bool>,
    strict: Option<bool>,
    exclude: Option<Vec<String>>,
    verbose: Option<bool>,
}

/// Result of looking for a config file.
#[derive(Debug)]
pub(crate) enum LoadedConfig {
    Missing(PathBuf),
    Parsed(CdgToml),
    Invalid(String),
}

/// Read and parse the config file at `path`. Never fails; the caller decides what a missing
/// or invalid file means (logging may not be set up yet).
pub(crate) fn load_cdg_toml(path: &Path) -> LoadedConfig {
    let s = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return LoadedConfig::Missing(path.to_path_buf());
        }
        Err(e) => return LoadedConfig::Invalid(format!("{}: {}", path.display(), e)),
    };
    match toml::from_str(&s) {
        Ok(file) => LoadedConfig::Parsed(file),
        Err(e) => LoadedConfig::Invalid(format!("{}: {}", path.display(), e)),
    }
}

/// Load `explicit` if given (must exist and parse), else the default `$HOME/.cdg.toml` if any.
/// Returns the parsed file (if usable) and a warning to log once logging is up.
pub(crate) fn resolve_config(explicit: Option<&Path>) -> Result<(Option<CdgToml>, Option<String>)> {
    let Some(path) = explicit
        .map(Path::to_path_buf)
        .or_else(|| crate::utils::PackagePaths::get().default_config_path())
    else {
        return Ok((None, None));
    };
    match (load_cdg_toml(&path), explicit.is_some()) {
        (LoadedConfig::Parsed(file), _) => Ok((Some(file), None)),
        (LoadedConfig::Missing(p), true) => bail!("config file {} not found", p.display()),
        (LoadedConfig::Invalid(msg), true) => bail!("invalid config file {}", msg),
        (LoadedConfig::Missing(_), false) => Ok((None, None)),
        (LoadedConfig::Invalid(msg), false) => Ok((None, Some(msg))),
    }
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($file:expr, $opts:expr, $file_field:ident => $opts_field:ident) => {
        if let Some(v) = $file.$file_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before applying CLI.
pub(crate) fn apply_file_to_opts(file: &CdgToml, opts: &mut Opts) {
    let settings = &file.settings;
    if let Some(ref p) = settings.root_path {
        opts.root_path = PathBuf::from(p);
    }
    if let Some(ref p) = settings.cache_file {
        opts.cache_file = Some(PathBuf::from(p));
    }
    apply_file_opt!(settings, opts, follow_links => follow_links);
    apply_file_opt!(settings, opts, strict => strict);
    if let Some(ref v) = settings.exclude {
        opts.exclude = v.clone();
    }
    apply_file_opt!(settings, opts, verbose => verbose);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_file_sets_only_present_fields() {
        let file: CdgToml = toml::from_str(
            r#"
            [settings]
            cache_file = "/tmp/repos.cache"
            exclude = ["node_modules"]
            "#,
        )
        .unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.cache_file, Some(PathBuf::from("/tmp/repos.cache")));
        assert_eq!(opts.exclude, vec!["node_modules".to_string()]);
        assert_eq!(opts.root_path, PathBuf::from("."));
        assert!(!opts.follow_links);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file: CdgToml = toml::from_str("").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert!(opts.cache_file.is_none());
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(load_cdg_toml(&missing), LoadedConfig::Missing(_)));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[settings\ncache_file = 1").unwrap();
        assert!(matches!(load_cdg_toml(&bad), LoadedConfig::Invalid(_)));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_explicit_config_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cdg.toml");
        std::fs::write(&path, "[settings]\nroot_path = \"/src\"\nstrict = true\n").unwrap();
        let (file, warning) = resolve_config(Some(&path)).unwrap();
        assert!(warning.is_none());
        let mut opts = Opts::default();
        apply_file_to_opts(&file.unwrap(), &mut opts);
        assert_eq!(opts.root_path, PathBuf::from("/src"));
        assert!(opts.strict);
    }
}
