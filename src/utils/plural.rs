//! Pluralization for status and log messages.

/// Plural suffix for a count: `""` for exactly one, `"s"` otherwise.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Count followed by the noun, e.g. `3 files`, `1 failure`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "file"), "0 files");
        assert_eq!(plural_count(1, "failure"), "1 failure");
        assert_eq!(plural_count(12, "document"), "12 documents");
    }

    #[test]
    fn test_plural_s() {
        assert_eq!(format!("exported 2 of 3 file{}", plural_s(3)), "exported 2 of 3 files");
        assert_eq!(plural_s(1), "");
    }
}
