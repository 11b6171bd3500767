//! Logging utilities with colored output and status display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//! - `StatusLine` for the single-line export status
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("export"; "writing {} files", count);
//!
//! // Status line for an export run
//! let mut status = StatusLine::new();
//! status.info("processing 1/3: logo.svg");
//! status.success("exported 3 files");
//! ```

use crate::export::{Severity, StatusMessage};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "export" => prefix.bright_blue().bold().to_string(),
        "inspect" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status Line (single-line status with overwrite)
// ============================================================================

/// Single-line status display for export runs
///
/// Each message overwrites the previous one, so the terminal shows only
/// the latest event of the run: the item being processed, then the
/// final summary.
pub struct StatusLine {
    /// Lines of previous output to clear
    last_lines: usize,
}

impl StatusLine {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    /// Display a reporter message with the symbol for its severity.
    pub fn show(&mut self, message: &StatusMessage) {
        match message.severity {
            Severity::Info => self.info(&message.text),
            Severity::Success => self.success(&message.text),
            Severity::Warning => self.warning(&message.text),
            Severity::Error => self.error(&message.text),
        }
    }

    /// Display progress message (• prefix, blue).
    pub fn info(&mut self, message: &str) {
        self.display(format!("{}", "•".blue()), message);
    }

    /// Display success message (✓ prefix, green).
    pub fn success(&mut self, message: &str) {
        self.display(format!("{}", "✓".green()), message);
    }

    /// Display warning message (⚠ prefix, yellow).
    pub fn warning(&mut self, message: &str) {
        self.display(format!("{}", "⚠".yellow()), message);
    }

    /// Display error message (✗ prefix, red).
    pub fn error(&mut self, message: &str) {
        self.display(format!("{}", "✗".red()), message);
    }

    /// Internal display logic with line overwriting.
    fn display(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        if self.last_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.last_lines as u16;
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        writeln!(stdout, "{symbol} {message}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of terminal lines a message occupies.
fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_new() {
        let status = StatusLine::new();
        assert_eq!(status.last_lines, 0);
    }

    #[test]
    fn test_line_count_single() {
        assert_eq!(line_count("processing 1/3: logo.svg"), 1);
    }

    #[test]
    fn test_line_count_multiline() {
        let message = "export failed: broken.svg\nrender failed: unexpected end of stream";
        assert_eq!(line_count(message), 2);
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
