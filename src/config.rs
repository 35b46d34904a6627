//! # Configuration
//!
//! Output naming and payload handling, loaded from an optional TOML file.
//! Every field defaults to the conventions existing encoded artifacts rely
//! on, so most runs never need a file:
//!
//! ```toml
//! [output]
//! encoded_suffix = "encoded"
//! encoded_extension = "png"
//! hidden_image_name = "hidden_img"
//! hidden_image_extension = "png"
//! hidden_text_name = "hidden_text.txt"
//!
//! [payload]
//! trim_text = true
//! ```
//!
//! Nothing here changes the embedding itself: the header width, channel
//! selection and capacity rules are fixed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub output: OutputConfig,
    pub payload: PayloadConfig,
}

/// Names of the files written by encode and decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the cover's stem: `<stem>-<suffix>.<ext>`.
    pub encoded_suffix: String,
    /// Must be a lossless format, the payload lives in the LSBs.
    pub encoded_extension: String,
    pub hidden_image_name: String,
    pub hidden_image_extension: String,
    pub hidden_text_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoded_suffix: "encoded".to_string(),
            encoded_extension: "png".to_string(),
            hidden_image_name: "hidden_img".to_string(),
            hidden_image_extension: "png".to_string(),
            hidden_text_name: "hidden_text.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Strip leading and trailing whitespace from the hidden-text file.
    pub trim_text: bool,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

/// Load a TOML configuration file.
pub fn load_config(path: &Path) -> Result<StegoConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config '{}'", path.display()))?;
    let config: StegoConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config '{}'", path.display()))?;
    Ok(config)
}
