//! Document ingestion from files and pasted text.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::document::SourceDocument;

/// Default upload ceiling: 5 MB.
pub const DEFAULT_MAX_SIZE: u64 = 5 * 1024 * 1024;

/// Name given to documents pasted or piped in as text.
pub const PASTED_NAME: &str = "export.svg";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("`{0}` is not an SVG file")]
    NotSvg(PathBuf),

    #[error("`{path}` is {size} bytes, over the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

/// Check for a `.svg` extension (case-insensitive).
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Read and validate one SVG file.
pub fn read_file(path: &Path, max_size: u64) -> Result<SourceDocument, IngestError> {
    if !is_svg_path(path) {
        return Err(IngestError::NotSvg(path.to_path_buf()));
    }

    let io_err = |err| IngestError::Io(path.to_path_buf(), err);
    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > max_size {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    let markup = fs::read_to_string(path).map_err(io_err)?;
    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
        .into_owned();

    Ok(SourceDocument::new(name, markup))
}

/// Wrap pasted/typed markup as a document.
pub fn from_text(markup: impl Into<String>) -> SourceDocument {
    SourceDocument::new(PASTED_NAME, markup)
}

/// Read pasted markup from a reader (standard input in the CLI).
///
/// At most `max_size` bytes are accepted, as for files.
pub fn read_text(reader: impl io::Read, max_size: u64) -> Result<SourceDocument, IngestError> {
    let path = Path::new(PASTED_NAME);
    let io_err = |err| IngestError::Io(path.to_path_buf(), err);

    let mut bytes = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(io_err)?;

    let size = bytes.len() as u64;
    if size > max_size {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    let markup = String::from_utf8(bytes)
        .map_err(|err| io_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    Ok(from_text(markup))
}
