//! Editor configuration module.
//!
//! Handles loading and validating `image-editor.toml` files. Every key is
//! optional; whatever the file leaves out keeps its stock default.
//!
//! ## Config File Location
//!
//! The CLI reads `image-editor.toml` from the working directory when it
//! exists, or the file given with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! mode = "resample"     # "resample" (filtered) or "resize" (fast, nearest pixel)
//! filter = "lanczos3"   # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [output]
//! jpeg_quality = 75     # 1-100
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::editor::EditorOptions;
use crate::imaging::{Quality, ResampleFilter, ResizeMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "image-editor.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from TOML.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// How resized pixels are computed.
    pub resize: ResizeConfig,
    /// Encoder settings.
    pub output: OutputConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// The library-level options this config describes.
    pub fn options(&self) -> EditorOptions {
        EditorOptions {
            mode: self.resize.mode,
            filter: self.resize.filter,
            jpeg_quality: Quality::new(self.output.jpeg_quality),
        }
    }
}

/// Resize settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Default mode when the caller doesn't ask for one.
    pub mode: ResizeMode,
    /// Interpolation filter for resample mode.
    pub filter: ResampleFilter,
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::default().value() as u32,
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load, deserialize and validate the config file at `path`.
///
/// Keys the file leaves out take their defaults. A missing file is an
/// [`ConfigError::Io`] error.
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EditorConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the stock defaults.
///
/// Used for the implicit `image-editor.toml` lookup in the working directory.
pub fn load_config_or_default(path: &Path) -> Result<EditorConfig, ConfigError> {
    if !path.exists() {
        return Ok(EditorConfig::default());
    }
    load_config(path)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Editor Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Save as image-editor.toml in the working directory, or pass --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[resize]
# "resample": interpolated scaling through `filter` (smooth, slower).
# "resize":   every output pixel copies the nearest source pixel (fast, blocky).
# The --fast flag always selects "resize".
mode = "resample"

# Interpolation filter for resample mode.
# One of: nearest, triangle, catmull-rom, gaussian, lanczos3.
filter = "lanczos3"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# JPEG encoding quality (1 = worst, 100 = best). PNG and GIF are lossless
# apart from GIF's 256-color palette.
jpeg_quality = 75
"##
}
