//! Markup escaping.

/// Escape the five reserved markup characters.
///
/// Applied to every entity-sourced string interpolated into an HTML or XML
/// context — text nodes and attribute values alike. Catalog records are
/// externally sourced free text and must never reach markup unescaped.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a string for use as a URL query value.
pub(crate) fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
