//! `[input]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [input]
//! max_size = "5MB"    # Largest accepted SVG file: B, KB or MB suffix
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Size ceiling for SVG files.
    /// Supports suffixes: B, KB, MB (e.g., "500KB", "5MB").
    pub max_size: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_size: "5MB".to_string(),
        }
    }
}

impl InputConfig {
    /// Parse `max_size` to bytes.
    pub fn max_size_bytes(&self) -> u64 {
        parse_size_string(&self.max_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size_bytes() == 0 {
            return Err(ConfigError::Validation(format!(
                "[input] max_size `{}` is not a positive size like \"5MB\"",
                self.max_size
            )));
        }
        Ok(())
    }
}

/// Parse size string (e.g., "10KB") to bytes.
///
/// Unparsable input and sizes that overflow `u64` are 0.
pub fn parse_size_string(s: &str) -> u64 {
    let s = s.trim().to_uppercase();
    let (number, unit) = if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };

    number
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .unwrap_or(0)
}
