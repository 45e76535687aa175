//! HTML escaping for server-rendered form markup.
//!
//! Every piece of user-authored text that ends up in rendered HTML (labels,
//! placeholders, option strings, settings text) MUST pass through one of
//! these functions. This is a security contract, not a formatting helper.

/// Escapes text for use inside an HTML element body.
pub fn html_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes text for use inside a double-quoted HTML attribute value.
///
/// The escape set is the same as [`html_text`]; a separate entry point keeps
/// call sites explicit about context.
pub fn html_attr(input: &str) -> String {
    html_text(input)
}
