//! Summary text sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching one inline markup tag: any substring delimited by `<` and `>`.
///
/// Removal is non-recursive; nested or malformed markup beyond this
/// substring rule is left untouched.
#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("failed to compile tag regex"));

/// Strips all inline markup tags from a summary.
///
/// Idempotent: stripping already-stripped text yields the same text.
#[must_use]
pub fn strip_tags(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").into_owned()
}

/// Builds a single-line teaser from a raw summary.
///
/// Strips markup, collapses whitespace runs, and truncates to at most
/// `max_chars` characters with a trailing ellipsis.
#[must_use]
pub fn teaser(raw: &str, max_chars: usize) -> String {
    let stripped = strip_tags(raw);
    let collapsed: Vec<&str> = stripped.split_whitespace().collect();
    let line = collapsed.join(" ");

    if line.chars().count() <= max_chars {
        return line;
    }
    let mut out: String = line.chars().take(max_chars).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_strip_tags_example() {
        // Arrange
        let raw = "<p>A show about <b>robots</b>.</p>";

        // Act
        let result = strip_tags(raw);

        // Assert
        assert_eq!(result, "A show about robots.");
    }

    #[test]
    fn test_strip_tags_idempotent() {
        // Arrange
        let raw = "<p>Wealthy entrepreneur <b>Bruce Wayne</b> fights crime.</p>";

        // Act
        let once = strip_tags(raw);
        let twice = strip_tags(&once);

        // Assert
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_tags_empty() {
        // Arrange & Act & Assert
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_strip_tags_no_markup() {
        // Arrange & Act & Assert
        assert_eq!(strip_tags("plain text"), "plain text");
    }

    #[test]
    fn test_strip_tags_unclosed_bracket_kept() {
        // Arrange: "<" without a closing ">" is not a tag
        let raw = "a < b and b > a";

        // Act
        let once = strip_tags(raw);
        let twice = strip_tags(&once);

        // Assert: idempotent even on malformed input
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_tags_attributes() {
        // Arrange
        let raw = r#"<a href="https://example.com">link</a>"#;

        // Act & Assert
        assert_eq!(strip_tags(raw), "link");
    }

    #[test]
    fn test_teaser_short_text_untouched() {
        // Arrange & Act
        let result = teaser("<p>Short.</p>", 80);

        // Assert
        assert_eq!(result, "Short.");
    }

    #[test]
    fn test_teaser_collapses_whitespace() {
        // Arrange & Act
        let result = teaser("<p>two\n  lines</p>", 80);

        // Assert
        assert_eq!(result, "two lines");
    }

    #[test]
    fn test_teaser_truncates_with_ellipsis() {
        // Arrange
        let raw = "<p>abcdefghij</p>";

        // Act
        let result = teaser(raw, 5);

        // Assert
        assert_eq!(result, "abcde\u{2026}");
    }
}
