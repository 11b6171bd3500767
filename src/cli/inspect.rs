//! `svgpng inspect` command.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    config::AppConfig,
    export::{SourceDocument, ingest},
    log,
    svg::{ResolvedDimensions, resolve},
};

/// Print the intrinsic size that an export would start from.
pub fn inspect(path: &Path, config: &AppConfig) -> Result<()> {
    let doc = if path == Path::new("-") {
        ingest::read_text(io::stdin().lock(), config.input.max_size_bytes())
            .context("failed to read stdin")?
    } else {
        ingest::read_file(path, config.input.max_size_bytes())?
    };

    log!("inspect"; "{}", describe(&doc, &resolve(&doc.markup)));
    Ok(())
}

fn describe(doc: &SourceDocument, dims: &ResolvedDimensions) -> String {
    format!(
        "{}: {}x{} (aspect ratio {:.4}) -> {}",
        doc.name,
        dims.width,
        dims.height,
        dims.aspect_ratio,
        doc.output_name()
    )
}
