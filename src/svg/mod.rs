//! SVG processing for PNG export.
//!
//! # Modules
//!
//! - [`dimensions`]: Intrinsic size inference (width/height, viewBox)
//! - [`rewrite`]: Root `width`/`height` rewriting to the export size
//! - [`rasterize`]: Rendering onto a pixmap and PNG encoding
//!
//! # Architecture
//!
//! ```text
//! SVG markup (from ingestion)
//!         │
//!         ├──────────────► dimensions ──► default export size
//!         ▼
//!    ┌─────────┐
//!    │ rewrite │ ──► width/height set on the root <svg>
//!    └────┬────┘
//!         │
//!         ▼
//!    ┌───────────┐
//!    │ rasterize │ ──► resvg paint + PNG encode
//!    └───────────┘
//! ```

pub mod dimensions;
pub mod rasterize;
pub mod rewrite;

pub use dimensions::{ResolvedDimensions, resolve};
pub use rasterize::{Rasterizer, RenderEngine, RenderError, ResvgEngine};
pub use rewrite::{StylePolicy, rewrite};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

/// Root element start tag located in a markup string.
pub(crate) struct RootTag<'a> {
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>`.
    pub end: usize,
    /// Parsed tag (name and attributes).
    pub tag: BytesStart<'a>,
}

impl RootTag<'_> {
    /// Check if the root element is an `<svg>` element (any prefix).
    pub fn is_svg(&self) -> bool {
        self.tag.local_name().as_ref() == b"svg"
    }

    /// Raw value of the first attribute named `key`.
    pub fn attr(&self, key: &str) -> Option<String> {
        self.tag
            .attributes()
            .with_checks(false)
            .filter_map(Result::ok)
            .find(|attr| attr.key.as_ref() == key.as_bytes())
            .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_owned))
    }
}

/// Find the start tag of the document's root element.
///
/// Skips the XML declaration, comments, doctype and processing
/// instructions. Returns `None` if the reader fails before the root element
/// or the document has no element at all.
pub(crate) fn find_root(markup: &str) -> Option<RootTag<'_>> {
    let mut reader = Reader::from_str(markup);

    loop {
        let start = usize::try_from(reader.buffer_position()).ok()?;
        let event = reader.read_event().ok()?;
        let end = usize::try_from(reader.buffer_position()).ok()?;

        let tag = match event {
            Event::Start(tag) | Event::Empty(tag) => tag,
            Event::Eof => return None,
            _ => continue,
        };

        // Leading text is reported as its own event, so `start` sits on `<`
        if !markup.get(start..end)?.starts_with('<') {
            return None;
        }

        return Some(RootTag { start, end, tag });
    }
}

/// Check that markup is a single well-formed element tree.
///
/// Mismatched end tags and reader errors fail; so do unclosed elements at
/// end of input and more than one top-level element.
pub(crate) fn is_well_formed(markup: &str) -> bool {
    let mut reader = Reader::from_str(markup);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event() {
            Err(_) => return false,
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    roots += 1;
                }
            }
            Ok(Event::End(_)) => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Ok(Event::Eof) => return depth == 0 && roots == 1,
            Ok(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_root_skips_prolog() {
        let svg = "<?xml version=\"1.0\"?>\n<!-- icon -->\n<svg width=\"10\"><g/></svg>";
        let root = find_root(svg).unwrap();
        assert!(root.is_svg());
        assert_eq!(&svg[root.start..root.end], "<svg width=\"10\">");
        assert_eq!(root.attr("width").as_deref(), Some("10"));
        assert_eq!(root.attr("height"), None);
    }

    #[test]
    fn test_find_root_self_closing() {
        let svg = "  <svg viewBox=\"0 0 4 4\"/>";
        let root = find_root(svg).unwrap();
        assert_eq!(&svg[root.start..root.end], "<svg viewBox=\"0 0 4 4\"/>");
    }

    #[test]
    fn test_find_root_prefixed() {
        let svg = r#"<s:svg xmlns:s="http://www.w3.org/2000/svg"></s:svg>"#;
        assert!(find_root(svg).unwrap().is_svg());
    }

    #[test]
    fn test_find_root_none() {
        assert!(find_root("").is_none());
        assert!(find_root("just some text").is_none());
    }

    #[test]
    fn test_first_duplicate_attr_wins() {
        let root = find_root(r#"<svg width="1" width="2">"#).unwrap();
        assert_eq!(root.attr("width").as_deref(), Some("1"));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("<svg><rect/></svg>"));
        assert!(is_well_formed("<?xml version=\"1.0\"?><svg/>"));
        assert!(!is_well_formed("<svg><g></svg>"));
        assert!(!is_well_formed("<svg><g>"));
        assert!(!is_well_formed("<svg/><svg/>"));
        assert!(!is_well_formed("plain text"));
        assert!(!is_well_formed(""));
    }
}
