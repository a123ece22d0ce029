use crate::models::{TextContent, UrlContent};

/// Prepend `https://` to links typed without a scheme
///
/// Anything that already starts with `http` (including `https`) is left
/// alone, as is a blank string. Only the emptiness check trims; the value
/// itself is never trimmed.
pub fn normalize_url(url: &str) -> String {
    if !url.trim().is_empty() && !url.starts_with("http") {
        format!("https://{url}")
    } else {
        url.to_string()
    }
}

/// Payload for a URL record, see [`normalize_url`]
pub fn format_url(record: &UrlContent) -> String {
    normalize_url(&record.url)
}

/// Text is encoded verbatim
pub fn format_text(record: &TextContent) -> String {
    record.text.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://x"), "http://x");
        assert_eq!(normalize_url("https://x.org/a?b=c"), "https://x.org/a?b=c");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "   ");
    }

    #[test]
    fn test_prefix_match_is_literal() {
        // any value starting with "http" counts as having a scheme
        assert_eq!(normalize_url("httpbin.org"), "httpbin.org");
        // leading whitespace defeats the prefix check
        assert_eq!(normalize_url(" http://x"), "https:// http://x");
    }

    #[test]
    fn test_text_identity() {
        let record = TextContent {
            text: "  keep\nme  ".into(),
        };
        assert_eq!(format_text(&record), "  keep\nme  ");
    }
}
