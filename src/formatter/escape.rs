use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the URI-component unreserved marks gets escaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URI component (spaces become `%20`, never `+`)
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_and_reserved() {
        assert_eq!(encode_component("Hi there"), "Hi%20there");
        assert_eq!(encode_component("a&b=c?d#e/f"), "a%26b%3Dc%3Fd%23e%2Ff");
        assert_eq!(encode_component("1+1"), "1%2B1");
    }

    #[test]
    fn test_unreserved_marks_pass_through() {
        assert_eq!(encode_component("A-z_0.9!~*'()"), "A-z_0.9!~*'()");
    }

    #[test]
    fn test_utf8_and_newlines() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("Line 1\nLine 2"), "Line%201%0ALine%202");
        assert_eq!(encode_component(""), "");
    }
}
