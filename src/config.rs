//! Editor configuration module.
//!
//! Handles loading, validating, and merging the editor's TOML config file.
//! Stock defaults are the base layer; a user file overrides any subset of them.
//!
//! ## Config File Location
//!
//! By default `imgedit.toml` in the current directory is read if it exists.
//! `--config <path>` points at another file, which then must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [filters]
//! threshold = 128           # Cutoff for the threshold command
//! boost = 50                # Amount added by the red/green/blue filters
//!
//! [resize]
//! filter = "catmull-rom"    # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [histogram]
//! output_dir = "."          # Where histogram_<channel>.png files go
//!
//! [startup]
//! max_attempts = 5          # Give up after N failed loads (omit = never)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::ResampleFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "imgedit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration.
///
/// All fields have defaults matching the classic behaviour (cutoff 128,
/// boost 50). Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Threshold and channel-boost amounts.
    pub filters: FiltersConfig,
    /// Resampling kernel for the resize command.
    pub resize: ResizeConfig,
    /// Where histogram charts are written.
    pub histogram: HistogramConfig,
    /// Initial image load policy.
    pub startup: StartupConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.startup.max_attempts == Some(0) {
            return Err(ConfigError::Validation(
                "startup.max_attempts must be at least 1 (omit it to retry forever)".into(),
            ));
        }
        if self.histogram.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "histogram.output_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Per-pixel filter amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiltersConfig {
    /// Samples strictly above this become 255, the rest 0. Any integer is
    /// accepted; values outside 0-255 give an all-white or all-black result.
    pub threshold: i32,
    /// Added to one channel by the red/green/blue filters, saturating at 255.
    pub boost: u8,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            boost: 50,
        }
    }
}

/// Resize settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: ResampleFilter,
}

/// Histogram output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramConfig {
    /// Directory receiving `histogram_red.png` and friends.
    pub output_dir: PathBuf,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Initial load policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartupConfig {
    /// Maximum number of attempts at loading the first image.
    /// When absent, the editor keeps asking until a file decodes.
    pub max_attempts: Option<u32>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EditorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<EditorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EditorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` on top of stock defaults.
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Load [`DEFAULT_CONFIG_FILE`] from `dir`, or stock defaults if it is absent.
pub fn load_default_config(dir: &Path) -> Result<EditorConfig, ConfigError> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return resolve_config(stock_defaults_value(), None);
    }
    load_config(&path)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgedit Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# imgedit reads ./imgedit.toml when present, or the file given with --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Filters
# ---------------------------------------------------------------------------
[filters]
# Threshold command: samples strictly above this value become 255, others 0.
# Values outside 0-255 are allowed and give an all-white or all-black image.
threshold = 128

# Red/green/blue filters: amount added to the channel, saturating at 255.
boost = 50

# ---------------------------------------------------------------------------
# Resize
# ---------------------------------------------------------------------------
[resize]
# Interpolation kernel: nearest, triangle, catmull-rom, gaussian, lanczos3.
filter = "catmull-rom"

# ---------------------------------------------------------------------------
# Histogram
# ---------------------------------------------------------------------------
[histogram]
# Directory receiving histogram_red.png, histogram_green.png, histogram_blue.png.
output_dir = "."

# ---------------------------------------------------------------------------
# Startup
# ---------------------------------------------------------------------------
[startup]
# How many times to ask for the input image before giving up.
# Omit or comment out to keep asking until a readable image is given.
# max_attempts = 5
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = EditorConfig::default();
        assert_eq!(config.filters.threshold, 128);
        assert_eq!(config.filters.boost, 50);
        assert_eq!(config.resize.filter, ResampleFilter::CatmullRom);
        assert_eq!(config.histogram.output_dir, PathBuf::from("."));
        assert_eq!(config.startup.max_attempts, None);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[filters]
boost = 80
"#;
        let config: EditorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.filters.boost, 80);
        // Default values preserved
        assert_eq!(config.filters.threshold, 128);
        assert_eq!(config.resize.filter, ResampleFilter::CatmullRom);
    }

    #[test]
    fn out_of_range_threshold_is_accepted() {
        let config: EditorConfig = toml::from_str("[filters]\nthreshold = -20").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.filters.threshold, -20);
    }

    #[test]
    fn boost_above_255_is_rejected_by_type() {
        assert!(toml::from_str::<EditorConfig>("[filters]\nboost = 300").is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<EditorConfig, _> = toml::from_str("[filters]\nthreshhold = 10");
        assert!(result.is_err());
        let result: Result<EditorConfig, _> = toml::from_str("[colors]\nred = 1");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let mut config = EditorConfig::default();
        config.startup.max_attempts = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.startup.max_attempts = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_histogram_dir() {
        let mut config = EditorConfig::default();
        config.histogram.output_dir = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge / load tests
    // =========================================================================

    #[test]
    fn merge_toml_overrides_leaves_and_keeps_siblings() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[filters]\nthreshold = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["filters"]["threshold"].as_integer(), Some(10));
        assert_eq!(merged["filters"]["boost"].as_integer(), Some(50));
        assert_eq!(merged["resize"]["filter"].as_str(), Some("catmull-rom"));
    }

    #[test]
    fn load_default_config_without_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_default_config(tmp.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn load_default_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "[resize]\nfilter = \"lanczos3\"\n\n[startup]\nmax_attempts = 3\n",
        )
        .unwrap();
        let config = load_default_config(tmp.path()).unwrap();
        assert_eq!(config.resize.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.startup.max_attempts, Some(3));
        assert_eq!(config.filters.boost, 50);
    }

    #[test]
    fn load_config_missing_explicit_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[filters\nboost = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[startup]\nmax_attempts = 0\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: EditorConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
