//! Intrinsic size inference.
//!
//! Resolution order on the root `<svg>` element:
//!
//! 1. explicit `width` and `height` (unit suffix stripped)
//! 2. `viewBox` with exactly four components
//! 3. the 300×300 default
//!
//! Anything unparsable, or a non-positive size, resolves to the default.

use super::{find_root, is_well_formed};

/// Fallback side length when no size can be derived.
pub const DEFAULT_SIDE: f64 = 300.0;

/// Intrinsic document size.
///
/// `aspect_ratio == width / height` with both sides positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDimensions {
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
}

impl ResolvedDimensions {
    pub const DEFAULT: Self = Self {
        width: DEFAULT_SIDE,
        height: DEFAULT_SIDE,
        aspect_ratio: 1.0,
    };

    /// Build from a size, rejecting zero, negative and non-finite sides.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return None;
        }
        Some(Self {
            width,
            height,
            aspect_ratio: width / height,
        })
    }
}

impl Default for ResolvedDimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Resolve the intrinsic size of SVG markup. Never fails.
pub fn resolve(markup: &str) -> ResolvedDimensions {
    if !is_well_formed(markup) {
        return ResolvedDimensions::DEFAULT;
    }
    let Some(root) = find_root(markup) else {
        return ResolvedDimensions::DEFAULT;
    };
    if !root.is_svg() {
        return ResolvedDimensions::DEFAULT;
    }

    let width = root.attr("width").as_deref().and_then(parse_length);
    let height = root.attr("height").as_deref().and_then(parse_length);
    if let (Some(width), Some(height)) = (width, height) {
        return ResolvedDimensions::new(width, height).unwrap_or_default();
    }

    root.attr("viewBox")
        .as_deref()
        .and_then(parse_view_box)
        .and_then(|(width, height)| ResolvedDimensions::new(width, height))
        .unwrap_or_default()
}

/// Parse a length such as `100`, `12.5px` or `3mm`.
///
/// The unit is stripped without conversion. Percentages and other
/// non-alphabetic suffixes are not lengths.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if number.is_empty() {
        return None;
    }
    number.trim_end().parse().ok()
}

/// Parse `minX minY width height`, separated by whitespace and/or commas.
fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [_, _, width, height] => Some((*width, *height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_size() {
        let dims = resolve(r#"<svg width="100" height="50"><rect/></svg>"#);
        assert_eq!(dims.width, 100.0);
        assert_eq!(dims.height, 50.0);
        assert_eq!(dims.aspect_ratio, 2.0);
    }

    #[test]
    fn test_explicit_size_wins_over_view_box() {
        let dims = resolve(r#"<svg viewBox="0 0 10 10" width="64px" height="32px"/>"#);
        assert_eq!((dims.width, dims.height, dims.aspect_ratio), (64.0, 32.0, 2.0));
    }

    #[test]
    fn test_view_box_only() {
        let dims = resolve(r#"<svg viewBox="0 0 48 48"><circle r="4"/></svg>"#);
        assert_eq!((dims.width, dims.height, dims.aspect_ratio), (48.0, 48.0, 1.0));
    }

    #[test]
    fn test_view_box_with_commas_and_offsets() {
        let dims = resolve(r#"<svg viewBox="-5,-5, 120  60"/>"#);
        assert_eq!((dims.width, dims.height, dims.aspect_ratio), (120.0, 60.0, 2.0));
    }

    #[test]
    fn test_only_one_explicit_side_uses_view_box() {
        let dims = resolve(r#"<svg width="500" viewBox="0 0 20 10"/>"#);
        assert_eq!((dims.width, dims.height), (20.0, 10.0));
    }

    #[test]
    fn test_view_box_wrong_arity_is_absent() {
        assert_eq!(resolve(r#"<svg viewBox="0 0 48"/>"#), ResolvedDimensions::DEFAULT);
        assert_eq!(
            resolve(r#"<svg viewBox="0 0 48 48 1"/>"#),
            ResolvedDimensions::DEFAULT
        );
    }

    #[test]
    fn test_percentage_is_not_a_length() {
        let dims = resolve(r#"<svg width="100%" height="100%" viewBox="0 0 30 15"/>"#);
        assert_eq!((dims.width, dims.height), (30.0, 15.0));
    }

    #[test]
    fn test_non_positive_size_falls_back() {
        assert_eq!(
            resolve(r#"<svg width="100" height="0"/>"#),
            ResolvedDimensions::DEFAULT
        );
        assert_eq!(
            resolve(r#"<svg viewBox="0 0 10 -4"/>"#),
            ResolvedDimensions::DEFAULT
        );
    }

    #[test]
    fn test_no_size_information() {
        assert_eq!(resolve("<svg><rect/></svg>"), ResolvedDimensions::DEFAULT);
    }

    #[test]
    fn test_unparsable_markup() {
        assert_eq!(resolve(""), ResolvedDimensions::DEFAULT);
        assert_eq!(resolve("not svg at all"), ResolvedDimensions::DEFAULT);
        assert_eq!(
            resolve(r#"<svg width="10" height="10"><g></svg>"#),
            ResolvedDimensions::DEFAULT
        );
        assert_eq!(
            resolve(r#"<html width="10" height="10"></html>"#),
            ResolvedDimensions::DEFAULT
        );
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("100"), Some(100.0));
        assert_eq!(parse_length(" 12.5px "), Some(12.5));
        assert_eq!(parse_length("3 mm"), Some(3.0));
        assert_eq!(parse_length("px"), None);
        assert_eq!(parse_length("50%"), None);
        assert_eq!(parse_length("auto"), None);
    }
}
