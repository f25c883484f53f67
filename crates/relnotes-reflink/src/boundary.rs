//! Byte classification shared by the reference matchers.

/// Check if a byte delimits a reference from surrounding prose.
///
/// Everything except ASCII letters and digits is a boundary. This includes
/// `_` and `*`: deciding whether they belong to emphasis syntax would need the
/// neighbouring inline nodes, so `_#1` and `#1_` are linked even though
/// Markdown would not treat the underscore as a word break there.
#[must_use]
pub fn is_boundary(b: u8) -> bool {
    !b.is_ascii_alphanumeric()
}

/// Characters allowed in a user or organization name.
pub(crate) fn is_user_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Lowercase hex digit, the alphabet of abbreviated and full commit hashes.
pub(crate) fn is_hash_char(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'a'..=b'f')
}

/// Bytes that may start an issue, mention, or commit hash reference.
pub(crate) fn is_trigger(b: u8) -> bool {
    b == b'#' || b == b'@' || is_hash_char(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_is_not_boundary() {
        for b in b'0'..=b'9' {
            assert!(!is_boundary(b));
        }
        for b in b'a'..=b'z' {
            assert!(!is_boundary(b));
        }
        for b in b'A'..=b'Z' {
            assert!(!is_boundary(b));
        }
    }

    #[test]
    fn test_punctuation_and_whitespace_are_boundaries() {
        for &b in b" \t\n#@-_*/().,:;!?[]`<>" {
            assert!(is_boundary(b), "expected {:?} to be a boundary", b as char);
        }
    }

    #[test]
    fn test_non_ascii_bytes_are_boundaries() {
        for b in "é日".bytes() {
            assert!(is_boundary(b));
        }
    }

    #[test]
    fn test_user_name_char() {
        assert!(is_user_name_char(b'a'));
        assert!(is_user_name_char(b'Z'));
        assert!(is_user_name_char(b'7'));
        assert!(is_user_name_char(b'-'));
        assert!(!is_user_name_char(b'_'));
        assert!(!is_user_name_char(b'/'));
    }

    #[test]
    fn test_hash_char_is_lowercase_hex() {
        assert!(is_hash_char(b'0'));
        assert!(is_hash_char(b'f'));
        assert!(!is_hash_char(b'g'));
        assert!(!is_hash_char(b'A'));
    }

    #[test]
    fn test_trigger() {
        assert!(is_trigger(b'#'));
        assert!(is_trigger(b'@'));
        assert!(is_trigger(b'c'));
        assert!(!is_trigger(b'G'));
        assert!(!is_trigger(b' '));
    }
}
