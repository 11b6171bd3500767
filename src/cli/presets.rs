//! `svgpng presets` command.

use owo_colors::OwoColorize;

use crate::export::{SIZE_PRESETS, SizePreset};

/// List the built-in size presets.
pub fn list_presets() {
    let width = name_width(SIZE_PRESETS);
    for preset in SIZE_PRESETS {
        let name = format!("{:<width$}", preset.name);
        println!("{}  {}", name.bold(), preset.description.dimmed());
    }
}

fn name_width(presets: &[SizePreset]) -> usize {
    presets.iter().map(|p| p.name.len()).max().unwrap_or(0)
}
