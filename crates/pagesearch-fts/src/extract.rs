//! Markup-to-text extraction.
//!
//! [`strip_tags`] removes every `<...>` span and puts a single space in its
//! place, so words from neighbouring elements never merge into one token
//! (`<b>foo</b><i>bar</i>` becomes ` foo  bar `, not `foobar`). It is a
//! tolerant scan, not a parser: a `<` with no closing `>` after it is kept as
//! text, along with everything that follows.
//!
//! [`extract_text`] additionally collapses whitespace runs and trims, which is
//! what block contributions use.

/// Remove markup tags, replacing each with a single space.
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push(' ');
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

/// Strip tags and normalize whitespace to single spaces, trimmed.
pub fn extract_text(markup: &str) -> String {
    normalize_whitespace(&strip_tags(markup))
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Tests
// ============================================================================
