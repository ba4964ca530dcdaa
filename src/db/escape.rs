//! String escaping for inlined SQL literals and quoted identifiers.

/// Escape a string by doubling every occurrence of `quote_char`.
///
/// SQL escapes a quote inside a quoted token by writing it twice, for both
/// string literals (`'it''s'`) and delimited identifiers (`"a""b"`).
pub fn escape_string_for_quote(s: &str, quote_char: char) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if c == quote_char {
            result.push(c);
        }
        result.push(c);
    }
    result
}

/// Render `s` as a single-quoted SQL string literal.
#[inline]
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", escape_string_for_quote(s, '\''))
}

/// Wrap an identifier in the given delimiters, doubling any closing delimiter.
#[inline]
pub fn quote_identifier(identifier: &str, open: char, close: char) -> String {
    format!("{}{}{}", open, escape_string_for_quote(identifier, close), close)
}
