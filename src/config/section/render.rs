//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! timeout_ms = 10000    # Abandon a single render after 10s (0 = wait forever)
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Per-document render timeout in milliseconds; 0 disables it.
    pub timeout_ms: u64,
}

impl RenderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}
