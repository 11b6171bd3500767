//! `[export]` section configuration.
//!
//! Default export size and style settings.
//!
//! # Example
//!
//! ```toml
//! [export]
//! width = 512               # Optional, default: the document's own size
//! height = 512              # Optional
//! preset = "1200x630"       # Optional, see `svgpng presets`
//! lock_aspect_ratio = true  # Keep width/height proportional
//! preserve_style = true     # Leave presentational attributes untouched
//! output_dir = "png"        # Where PNG files are written
//! ```
//!
//! A preset is applied before `width`/`height`, so an explicit side wins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::export::find_preset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target width in pixels.
    pub width: Option<u32>,

    /// Target height in pixels.
    pub height: Option<u32>,

    /// Named size preset (e.g. `512x512`).
    pub preset: Option<String>,

    /// Recompute the other side when one side changes.
    pub lock_aspect_ratio: bool,

    /// Keep style/class/viewBox attributes as authored.
    pub preserve_style: bool,

    /// Output directory for PNG files.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            preset: None,
            lock_aspect_ratio: true,
            preserve_style: true,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == Some(0) {
            return Err(ConfigError::Validation(
                "[export] width must be a positive number of pixels".into(),
            ));
        }
        if self.height == Some(0) {
            return Err(ConfigError::Validation(
                "[export] height must be a positive number of pixels".into(),
            ));
        }
        if let Some(name) = &self.preset
            && find_preset(name).is_none()
        {
            return Err(ConfigError::Validation(format!(
                "[export] unknown preset `{name}`, run `svgpng presets` to list them"
            )));
        }
        Ok(())
    }
}
