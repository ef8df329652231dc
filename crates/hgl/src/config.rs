//! Configuration for hgl
//!
//! Settings come from two places: an optional YAML file (by default
//! `.config/hgl/config.yaml` under the working directory) and command-line
//! flags. Both are folded into one [`HarnessConfig`] value which is then
//! passed explicitly to whatever needs it.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use facet::Facet;

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".config/hgl/config.yaml";

/// Settings as written in the config file
#[derive(Debug, Clone, Default, Facet)]
pub struct FileConfig {
    /// Enable coverage analysis for `hgl test`
    #[facet(default)]
    pub cover: bool,

    /// Write a coverage profile to this path after `hgl test`
    #[facet(default)]
    pub coverprofile: Option<String>,

    /// Print full traces in `hgl dev`
    #[facet(default)]
    pub verbose: bool,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub coverage_enabled: bool,
    pub profile_path: Option<PathBuf>,
    pub verbose: bool,
}

impl HarnessConfig {
    /// Combine file settings with command-line flags.
    ///
    /// Flags can only switch features on; a profile path from the command
    /// line replaces one from the file. Asking for a profile turns coverage on.
    pub fn resolve(
        file: FileConfig,
        cover: bool,
        profile_path: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        let profile_path = profile_path.or_else(|| file.coverprofile.map(PathBuf::from));
        let coverage_enabled = cover || file.cover || profile_path.is_some();
        HarnessConfig {
            coverage_enabled,
            profile_path,
            verbose: verbose || file.verbose,
        }
    }
}

/// Load the config file.
///
/// An explicitly requested file must exist; the default location is
/// optional and falls back to defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                eyre::bail!(
                    "Config file not found at {}\n\n\
                     Create a config file with your defaults:\n\n\
                     cover: true\n\
                     coverprofile: cover.txt",
                    path.display()
                );
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !path.exists() {
                return Ok(FileConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

    let config: FileConfig = facet_yaml::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
