//! URL-Safe Encoder - SVG markup to `url("...")` payload
//!
//! Narrower than generic URI encoding: only the characters that break a
//! quoted CSS `url()` or a data URI are escaped. Everything else, including
//! non-ASCII text, passes through so the stylesheet stays compact.

use thiserror::Error;

/// Media type prefix of every embedded icon.
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml,";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Decoded payload is not UTF-8")]
    Utf8,
}

/// Encode SVG markup for use inside `url("...")`.
///
/// Whitespace between tags is dropped, any other whitespace run collapses to
/// a single space, and the reserved set is percent-encoded as UTF-8 bytes.
pub fn encode_svg(svg: &str) -> String {
    let collapsed = collapse_whitespace(svg);
    let mut out = String::with_capacity(collapsed.len());
    let mut buf = [0u8; 4];

    for c in collapsed.chars() {
        if needs_escape(c) {
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Full data URI for an SVG, ready to be wrapped in `url("...")`.
pub fn data_uri(svg: &str) -> String {
    format!("{}{}", DATA_URI_PREFIX, encode_svg(svg))
}

/// Reverse the percent-encoding of an encoded payload.
///
/// Whitespace collapsed by [`encode_svg`] is not restored. Malformed escapes
/// are kept literally.
pub fn decode(payload: &str) -> Result<String, DecodeError> {
    urlencoding::decode(payload)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::Utf8)
}

fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '"' | '\'' | '%' | '#' | '<' | '>' | '(' | ')' | '?' | '[' | '\\' | ']' | '^' | '`'
                | '{' | '|' | '}'
        )
}

fn collapse_whitespace(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len());
    let mut chars = svg.trim_matches(|c: char| c.is_ascii_whitespace()).chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_whitespace() {
            out.push(c);
            continue;
        }

        while chars.next_if(|n| n.is_ascii_whitespace()).is_some() {}

        // `>  <` becomes `><`
        let between_tags = out.ends_with('>') && chars.peek() == Some(&'<');
        if !between_tags {
            out.push(' ');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_reserved_characters() {
        let encoded = encode_svg(r##"<path fill="#fff" d="M0 0"/>"##);
        assert_eq!(encoded, "%3Cpath fill=%22%23fff%22 d=%22M0 0%22/%3E");
    }

    #[test]
    fn test_leaves_safe_characters() {
        let encoded = encode_svg("a=b:c/d;e,f.g");
        assert_eq!(encoded, "a=b:c/d;e,f.g");
    }

    #[test]
    fn test_collapses_whitespace() {
        let svg = "<svg>\n  <g>\n    <path d=\"M0   0\n L1 1\"/>\n  </g>\n</svg>\n";
        let decoded = decode(&encode_svg(svg)).unwrap();
        assert_eq!(decoded, r#"<svg><g><path d="M0 0 L1 1"/></g></svg>"#);
    }

    #[test]
    fn test_escapes_parentheses_and_quotes() {
        let encoded = encode_svg(r#"<rect fill='url(#a)'/>"#);
        assert!(!encoded.contains('('));
        assert!(!encoded.contains('\''));
        assert!(!encoded.contains('"'));
        assert!(encoded.contains("%28%23a%29"));
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(encode_svg("<text>é</text>"), "%3Ctext%3Eé%3C/text%3E");
    }

    #[test]
    fn test_control_characters_escaped() {
        assert_eq!(encode_svg("a\u{7f}b"), "a%7Fb");
    }

    #[test]
    fn test_data_uri_prefix() {
        assert_eq!(data_uri("<svg/>"), "data:image/svg+xml,%3Csvg/%3E");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert_eq!(decode("%FF%FE"), Err(DecodeError::Utf8));
        assert_eq!(decode("%E2%9C%93").unwrap(), "\u{2713}");
    }
}
