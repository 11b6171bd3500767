//! Root size attribute rewriting.
//!
//! Sets `width`/`height` on the root `<svg>` element to the export size.
//! Only the size attribute values are spliced into the root start tag;
//! every other byte of the document, `viewBox`, `style`, `class` and their
//! quoting included, is left as is.

use std::ops::Range;

use super::{RootTag, find_root};

/// How presentational attributes are treated during a rewrite.
///
/// Size attributes are replaced the same way under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePolicy {
    /// Leave everything but the size attributes untouched.
    #[default]
    Preserve,
    /// Replace the size attributes independently of existing styling.
    Discard,
}

impl StylePolicy {
    pub const fn from_preserve(preserve_style: bool) -> Self {
        if preserve_style {
            Self::Preserve
        } else {
            Self::Discard
        }
    }
}

/// Rewrite the root `width`/`height` attributes. Never fails.
///
/// Existing attributes keep their position and quote character; missing
/// ones are inserted right after the element name, `width` before
/// `height`. Markup without an `<svg>` root is returned unchanged.
pub fn rewrite(markup: &str, size: (u32, u32), policy: StylePolicy) -> String {
    let Some(root) = find_root(markup).filter(RootTag::is_svg) else {
        return markup.to_string();
    };

    let tag = &markup[root.start..root.end];
    let width = size.0.to_string();
    let height = size.1.to_string();

    // Neither policy touches attributes other than width/height
    let spliced = match policy {
        StylePolicy::Preserve | StylePolicy::Discard => set_size_attributes(tag, &width, &height),
    };

    match spliced {
        Some(tag) => format!("{}{}{}", &markup[..root.start], tag, &markup[root.end..]),
        None => markup.to_string(),
    }
}

/// Byte ranges of one attribute inside a start tag.
struct AttrSpan {
    key: Range<usize>,
    /// Value without its quotes.
    value: Range<usize>,
}

/// Start tag split into its name and attribute spans.
struct TagLayout {
    name_end: usize,
    attrs: Vec<AttrSpan>,
}

/// Replace the first `width`/`height` values in place, inserting missing ones.
fn set_size_attributes(tag: &str, width: &str, height: &str) -> Option<String> {
    let layout = scan_tag(tag)?;
    let value_of = |key: &str| {
        layout
            .attrs
            .iter()
            .find(|attr| &tag[attr.key.clone()] == key)
            .map(|attr| attr.value.clone())
    };

    let mut edits: Vec<(Range<usize>, String)> = Vec::with_capacity(3);
    let mut inserted = String::new();
    for (key, value) in [("width", width), ("height", height)] {
        match value_of(key) {
            Some(range) => edits.push((range, value.to_string())),
            None => inserted.push_str(&format!(" {key}=\"{value}\"")),
        }
    }
    if !inserted.is_empty() {
        edits.push((layout.name_end..layout.name_end, inserted));
    }
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(tag.len() + 32);
    let mut pos = 0;
    for (range, text) in edits {
        out.push_str(&tag[pos..range.start]);
        out.push_str(&text);
        pos = range.end;
    }
    out.push_str(&tag[pos..]);
    Some(out)
}

/// Locate the element name and every `key=quoted value` pair of a start tag.
///
/// All delimiters are ASCII, so every range falls on a char boundary.
fn scan_tag(tag: &str) -> Option<TagLayout> {
    let bytes = tag.as_bytes();
    let is_delim = |b: u8| b.is_ascii_whitespace() || b == b'/' || b == b'>';
    let skip_ws = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }
        i
    };

    if bytes.first() != Some(&b'<') {
        return None;
    }
    let mut i = 1;
    while bytes.get(i).is_some_and(|&b| !is_delim(b)) {
        i += 1;
    }
    let name_end = i;

    let mut attrs = Vec::new();
    loop {
        i = skip_ws(i);
        match bytes.get(i)? {
            b'/' | b'>' => break,
            _ => {}
        }

        let key_start = i;
        while bytes.get(i).is_some_and(|&b| b != b'=' && !is_delim(b)) {
            i += 1;
        }
        let key = key_start..i;

        i = skip_ws(i);
        if bytes.get(i) != Some(&b'=') {
            return None;
        }
        i = skip_ws(i + 1);

        let quote = *bytes.get(i).filter(|&&b| b == b'"' || b == b'\'')?;
        let value_start = i + 1;
        let value_len = bytes[value_start..].iter().position(|&b| b == quote)?;
        let value = value_start..value_start + value_len;
        i = value.end + 1;

        attrs.push(AttrSpan { key, value });
    }

    Some(TagLayout { name_end, attrs })
}
