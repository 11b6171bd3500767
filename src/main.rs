//! svgpng - Convert SVG documents into fixed-size PNG images.

#![allow(dead_code)]

mod cli;
mod config;
mod export;
mod logger;
mod svg;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = AppConfig::load(&cli)?;

    match &cli.command {
        Commands::Export { args } => cli::export::export(args, &config),
        Commands::Inspect { path } => {
            cli::inspect::inspect(path, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Presets => {
            cli::presets::list_presets();
            Ok(ExitCode::SUCCESS)
        }
    }
}
