//! Plain-text sanitization for untrusted submission data.
//!
//! Submitted entry keys and values are reduced to plain text before storage:
//! markup is stripped and control characters are collapsed. Sanitization is
//! applied server-side on every submission path regardless of any client-side
//! validation, since the client is untrusted.

/// Removes anything that looks like an HTML/XML tag.
///
/// A `<` opens a tag and everything through the next `>` is dropped; an
/// unterminated `<` drops the remainder of the string.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match (in_tag, c) {
            (false, '<') => in_tag = true,
            (false, _) => out.push(c),
            (true, '>') => in_tag = false,
            (true, _) => {}
        }
    }
    out
}

/// Sanitizes a single-line text value.
///
/// Strips tags, then collapses all whitespace and control characters into
/// single spaces and trims the ends.
pub fn text_field(input: &str) -> String {
    let stripped = strip_tags(input);
    let mut out = String::with_capacity(stripped.len());
    let mut last_was_space = true;
    for c in stripped.chars() {
        if c.is_whitespace() || c.is_control() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Sanitizes a multi-line text value.
///
/// Strips tags and drops control characters, but preserves newlines and tabs.
/// CRLF pairs are normalized to `\n`.
pub fn textarea_field(input: &str) -> String {
    let stripped = strip_tags(input);
    let normalized = stripped.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Reduces an identifier to a lowercase key: `[a-z0-9_-]` only.
pub fn key(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_simple() {
        assert_eq!(strip_tags("<b>bold</b>"), "bold");
    }

    #[test]
    fn test_strip_tags_script() {
        assert_eq!(strip_tags("<script>alert(1)</script>ok"), "alert(1)ok");
    }

    #[test]
    fn test_strip_tags_unterminated() {
        assert_eq!(strip_tags("hello <img src=x"), "hello ");
    }

    #[test]
    fn test_strip_tags_no_markup() {
        assert_eq!(strip_tags("2 < 3 is not a tag?"), "2 ");
    }

    #[test]
    fn test_text_field_collapses_whitespace() {
        assert_eq!(text_field("  a\t\tb \n c  "), "a b c");
    }

    #[test]
    fn test_text_field_strips_markup() {
        assert_eq!(text_field("<i>Ali</i>  Reza"), "Ali Reza");
    }

    #[test]
    fn test_text_field_control_chars() {
        assert_eq!(text_field("a\u{0000}b\u{0007}c"), "a b c");
    }

    #[test]
    fn test_text_field_empty() {
        assert_eq!(text_field("   "), "");
    }

    #[test]
    fn test_textarea_field_keeps_newlines() {
        assert_eq!(textarea_field("line one\r\nline two"), "line one\nline two");
    }

    #[test]
    fn test_textarea_field_drops_other_controls() {
        assert_eq!(textarea_field("a\u{0000}b\nc"), "ab\nc");
    }

    #[test]
    fn test_textarea_field_strips_markup() {
        assert_eq!(
            textarea_field("hello\n<script>x()</script>world"),
            "hello\nx()world"
        );
    }

    #[test]
    fn test_key_lowercases_and_filters() {
        assert_eq!(key("Full Name!"), "fullname");
        assert_eq!(key("field-42_a"), "field-42_a");
        assert_eq!(key("عنوان"), "");
    }
}
