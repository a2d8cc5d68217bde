//! Run configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! ```text
//! stock defaults  →  <root>/artist-rename.toml (or --config FILE)  →  CLI flags
//! ```
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! artists = []              # Known artist folder names
//! # default_artist = "..."  # Used when no folder name matches an artist
//! # max_depth = 3           # Omit for unlimited
//! ```
//!
//! Unknown keys are rejected to catch typos early. Artist names end up inside
//! filenames, so they must be non-empty, free of path separators, and must not
//! start with a dot.

use crate::artist::ArtistSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the root folder when no path is given.
pub const CONFIG_FILE_NAME: &str = "artist-rename.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Known artist folder names, matched exactly against path segments.
    pub artists: Vec<String>,
    /// Artist used when no path segment matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_artist: Option<String>,
    /// Deepest recursion level below the root; `None` walks everything.
    /// Level 0 means only the root's immediate subfolders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl RenameConfig {
    /// Validate names and normalise blank values.
    ///
    /// A blank `default_artist` is treated as unset.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self
            .default_artist
            .as_deref()
            .is_some_and(|a| a.trim().is_empty())
        {
            self.default_artist = None;
        }
        for name in self.artists.iter().chain(self.default_artist.iter()) {
            validate_artist_name(name)?;
        }
        Ok(self)
    }

    /// The configured artists as a lookup set.
    pub fn artist_set(&self) -> ArtistSet {
        self.artists.iter().cloned().collect()
    }

    /// Append artists from the command line and override scalar settings.
    pub fn with_overrides(
        mut self,
        artists: &[String],
        default_artist: Option<&str>,
        max_depth: Option<usize>,
    ) -> Self {
        self.artists.extend(artists.iter().cloned());
        if let Some(a) = default_artist {
            self.default_artist = Some(a.to_string());
        }
        if max_depth.is_some() {
            self.max_depth = max_depth;
        }
        self
    }
}

fn validate_artist_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "artist names must not be empty".into(),
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "artist name '{name}' must not contain path separators"
        )));
    }
    if name.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "artist name '{name}' must not start with a dot"
        )));
    }
    Ok(())
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::Table(toml::map::Map::from_iter([(
        "artists".to_string(),
        toml::Value::Array(Vec::new()),
    )]))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if the file is absent.
pub fn load_raw_config(file: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !file.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(file)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<RenameConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(stock_defaults_value(), ov),
        None => stock_defaults_value(),
    };
    let config: RenameConfig = merged.try_into()?;
    config.validate()
}

/// Default config file location for a root folder.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load config for a run rooted at `root`, from `file` if given, otherwise
/// from [`CONFIG_FILE_NAME`] in the root. A missing file yields defaults,
/// except when `file` was named explicitly.
pub fn load_config(root: &Path, file: Option<&Path>) -> Result<RenameConfig, ConfigError> {
    let overlay = match file {
        Some(f) => Some(toml::from_str(&fs::read_to_string(f)?)?),
        None => load_raw_config(&config_path(root))?,
    };
    resolve_config(overlay)
}

/// A commented stock config file, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# artist-rename configuration
# ===========================
# Place this file in the root folder as artist-rename.toml, or pass it
# with --config. Command-line flags override these values; --artist
# adds to the list below.
# Unknown keys will cause an error.

# Folder names that identify an artist. The first path segment (from the
# root down) that matches one of these becomes the filename prefix.
artists = []

# Artist used for folders where no path segment matches.
# default_artist = "Unknown"

# How far below the root to recurse. 0 = only the root's immediate
# subfolders. Omit for unlimited.
# max_depth = 3
"##
}
