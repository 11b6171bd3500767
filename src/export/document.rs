//! Source documents and output naming.

/// One SVG document queued for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Display/file name, e.g. `logo.svg`.
    pub name: String,
    /// Raw markup as ingested.
    pub markup: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markup: markup.into(),
        }
    }

    /// Output file name for this document.
    pub fn output_name(&self) -> String {
        output_name(&self.name)
    }
}

/// Derive the PNG file name for a source name.
///
/// A trailing `.svg` (any case) is replaced; otherwise `.png` is appended.
///
/// # Examples
///
/// - `output_name("logo.svg")` -> `"logo.png"`
/// - `output_name("ICON.SVG")` -> `"ICON.png"`
/// - `output_name("drawing")` -> `"drawing.png"`
pub fn output_name(name: &str) -> String {
    const EXT: &str = ".svg";
    let stem = name
        .len()
        .checked_sub(EXT.len())
        .filter(|&at| name.is_char_boundary(at) && name[at..].eq_ignore_ascii_case(EXT))
        .map_or(name, |at| &name[..at]);
    format!("{stem}.png")
}
