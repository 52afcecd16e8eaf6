//! Markup escaping shared by the HTML and SVG serializers.

/// Escape the five XML/HTML special characters for safe embedding in
/// element text content and quoted attribute values.
///
/// Handles `&` (must be first), `<`, `>`, `"`, and `'`.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape an optional value, rendering `None` as an empty string.
pub fn escape_opt(input: Option<&str>) -> String {
    input.map(escape).unwrap_or_default()
}
