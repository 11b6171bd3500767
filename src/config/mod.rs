//! Configuration management for `svgpng.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── export     # [export]
//! │   ├── input      # [input]
//! │   └── render     # [render]
//! ├── types/         # Utility types
//! │   └── error      # ConfigError
//! ├── util.rs        # Config file lookup
//! └── mod.rs         # AppConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `[export]` | Target size, preset, aspect lock, style, out dir |
//! | `[input]`  | Ingestion size ceiling                           |
//! | `[render]` | Per-document render timeout                      |
//!
//! The config file is optional. Without `-C`, `svgpng.toml` is searched
//! upward from the working directory and defaults apply when none is found.
//! An explicit `-C` path must exist.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ExportConfig, InputConfig, RenderConfig};
pub use types::ConfigError;

use crate::{
    cli::{Cli, Commands, ExportArgs},
    log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name looked up when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "svgpng.toml";

/// Root configuration structure representing svgpng.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the loaded config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Export defaults
    pub export: ExportConfig,

    /// Input limits
    pub input: InputConfig,

    /// Rendering settings
    pub render: RenderConfig,
}

impl AppConfig {
    /// Load configuration from CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match Self::resolve_config_path(&cli.config)? {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.anchor_output_dir(&path);
                config.config_path = path;
                config
            }
            None => Self::default(),
        };

        if let Commands::Export { args } = &cli.command {
            config.apply_export_args(args);
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file to read, if any.
    ///
    /// The default name is optional and searched upward; any other name is
    /// a user request and must exist.
    fn resolve_config_path(config: &Path) -> Result<Option<PathBuf>, ConfigError> {
        if config == Path::new(DEFAULT_CONFIG) {
            return Ok(find_config_file(config));
        }
        if config.is_file() {
            Ok(Some(config.to_path_buf()))
        } else {
            Err(ConfigError::NotFound(config.to_path_buf()))
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Make a relative `output_dir` from the config file relative to that file.
    fn anchor_output_dir(&mut self, config_path: &Path) {
        if self.export.output_dir.is_relative()
            && let Some(parent) = config_path.parent()
        {
            self.export.output_dir = parent.join(&self.export.output_dir);
        }
    }

    // ========================================================================
    // CLI overrides
    // ========================================================================

    /// Apply export command arguments on top of the file values.
    ///
    /// A preset named on the command line replaces any size from the file,
    /// while explicit `--width`/`--height` still win over the preset.
    fn apply_export_args(&mut self, args: &ExportArgs) {
        if let Some(preset) = &args.preset {
            self.export.preset = Some(preset.clone());
            self.export.width = None;
            self.export.height = None;
        }
        if args.width.is_some() {
            self.export.width = args.width;
        }
        if args.height.is_some() {
            self.export.height = args.height;
        }

        Self::update_option(&mut self.export.lock_aspect_ratio, args.lock_aspect_ratio.as_ref());
        Self::update_option(&mut self.export.preserve_style, args.preserve_style.as_ref());
        Self::update_option(&mut self.export.output_dir, args.output.as_ref());
        Self::update_option(&mut self.input.max_size, args.max_size.as_ref());
        Self::update_option(&mut self.render.timeout_ms, args.timeout.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.export.validate()?;
        self.input.validate()?;
        Ok(())
    }
}

// ============================================================================
// test helpers
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
