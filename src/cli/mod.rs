//! Command-line interface module.

mod args;
pub mod export;
pub mod inspect;
pub mod presets;

pub use args::{Cli, Commands, ExportArgs};
