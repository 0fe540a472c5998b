//! Application configuration constants.
//! Names and tuning in one place.

use std::path::PathBuf;
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// `$HOME/.cdg.toml`, or None when the home directory cannot be determined.
    pub fn default_config_path(&self) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(self.config_filename()))
    }
}

// ---- Scan ----

/// Directory name that marks a repository root.
pub const GIT_DIR_NAME: &str = ".git";

/// Capacity of the emission channel between scanner and collector. Shallow on purpose: the
/// scanner may block on send, the collector always drains to the finish signal.
pub const SCAN_CHANNEL_CAP: usize = 2;

/// Suffix for the temp file the cache is written to before the rename.
pub const TEMP_SUFFIX: &str = "tmp";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_names() {
        let paths = PackagePaths::get();
        assert_eq!(paths.pkg_name(), "cdg");
        assert_eq!(paths.config_filename(), ".cdg.toml");
    }
}
