//! Small helpers for the HTML fragments emitted by the preview and print
//! renderers.

/// Font settings shared by preview fields and printed text nodes.
pub const FIELD_TEXT_STYLE: &str =
    "font-family:Arial,Helvetica,sans-serif;font-size:14px;line-height:1;";

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("O'Brien & <Sons>"), "O&#39;Brien &amp; &lt;Sons&gt;");
        assert_eq!(escape("plain"), "plain");
    }
}
