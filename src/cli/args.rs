//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert SVG documents into fixed-size PNG images
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: svgpng.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "svgpng.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export SVG documents as PNG images
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// Show the intrinsic size resolved for an SVG document
    #[command(visible_alias = "i")]
    Inspect {
        /// SVG file to inspect. Use `-` to read markup from stdin.
        #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,
    },

    /// List the built-in size presets
    #[command(visible_alias = "p")]
    Presets,
}

/// Export command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// SVG files to export. Use `-` to read pasted markup from stdin.
    #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Target width in pixels
    #[arg(short = 'W', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Named size preset (see `svgpng presets`)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Keep width and height proportional
    #[arg(short = 'l', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub lock_aspect_ratio: Option<bool>,

    /// Leave style, class and viewBox attributes untouched
    #[arg(short = 's', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub preserve_style: Option<bool>,

    /// Output directory for PNG files
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Report as a batch even for a single document
    #[arg(short, long)]
    pub batch: bool,

    /// Largest accepted SVG file (e.g. "500KB", "5MB")
    #[arg(long)]
    pub max_size: Option<String>,

    /// Abandon a single render after this many milliseconds (0 = never)
    #[arg(short, long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Print debug details for each document
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_args() {
        let cli = Cli::parse_from(["svgpng", "e", "a.svg", "b.svg", "-W", "128", "-b"]);
        assert_eq!(cli.config, PathBuf::from("svgpng.toml"));
        let Commands::Export { args } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.width, Some(128));
        assert_eq!(args.height, None);
        assert!(args.batch);
        assert_eq!(args.lock_aspect_ratio, None);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(Cli::try_parse_from(["svgpng", "export", "a.svg", "-W", "0"]).is_err());
    }

    #[test]
    fn test_export_requires_path() {
        assert!(Cli::try_parse_from(["svgpng", "export"]).is_err());
    }

    #[test]
    fn test_inspect_and_presets() {
        let cli = Cli::parse_from(["svgpng", "-C", "other.toml", "inspect", "-"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Inspect { ref path } if path == &PathBuf::from("-")));

        let cli = Cli::parse_from(["svgpng", "p"]);
        assert!(matches!(cli.command, Commands::Presets));
    }
}
