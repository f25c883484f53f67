//! Detection of bare URLs in text (GFM extended autolinks).
//!
//! pulldown-cmark reports `https://...` written without angle brackets as
//! plain text. References inside such URLs must not be linked, and URLs on the
//! same forge get a compact display, so text ranges are split into plain text
//! and URL pieces before scanning.

use std::ops::Range;

/// A piece of a text range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    /// Plain text.
    Text(Range<usize>),
    /// Literal URL.
    Url(Range<usize>),
}

/// Split `src[range]` into text and URL pieces, in source order.
///
/// Empty text pieces are omitted.
pub(crate) fn split(src: &[u8], range: Range<usize>) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut text_start = range.start;
    let mut i = range.start;

    while i < range.end {
        match url_end(src, i, range.start, range.end) {
            Some(end) => {
                if text_start < i {
                    pieces.push(Piece::Text(text_start..i));
                }
                pieces.push(Piece::Url(i..end));
                i = end;
                text_start = end;
            }
            None => i += 1,
        }
    }
    if text_start < range.end {
        pieces.push(Piece::Text(text_start..range.end));
    }
    pieces
}

/// End of the URL starting at `start`, if one starts there.
///
/// `text_start` is the first byte of the inline text holding the candidate.
fn url_end(src: &[u8], start: usize, text_start: usize, limit: usize) -> Option<usize> {
    let b = src[start];
    if b != b'h' && b != b'w' {
        return None;
    }
    if start > 0 && !is_url_lead(src[start - 1]) && !is_cell_start(src, start, text_start) {
        return None;
    }

    let rest = &src[start..limit];
    let (domain_start, needs_period) = if rest.starts_with(b"https://") {
        (start + 8, false)
    } else if rest.starts_with(b"http://") {
        (start + 7, false)
    } else if rest.starts_with(b"www.") {
        (start + 4, true)
    } else {
        return None;
    };

    let mut domain_end = domain_start;
    while domain_end < limit && is_domain_char(src[domain_end]) {
        domain_end += 1;
    }
    let domain = &src[domain_start..domain_end];
    if domain.is_empty() || domain[0] == b'.' || (needs_period && !domain.contains(&b'.')) {
        return None;
    }

    let mut end = domain_end;
    while end < limit && !src[end].is_ascii_whitespace() && src[end] != b'<' {
        end += 1;
    }

    let end = trim_trailing(src, start, end);
    // Trailing punctuation may eat into a scheme-only candidate like `https://.`
    (end > domain_start).then_some(end)
}

/// Characters after which an autolink may start.
fn is_url_lead(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'*' | b'_' | b'~' | b'(')
}

/// Table cell content starts right after its `|` delimiter, like a new line.
fn is_cell_start(src: &[u8], start: usize, text_start: usize) -> bool {
    start == text_start && src[start - 1] == b'|'
}

fn is_domain_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')
}

/// Strip trailing punctuation that belongs to the prose, not the URL.
fn trim_trailing(src: &[u8], start: usize, mut end: usize) -> usize {
    loop {
        let Some(&last) = src[start..end].last() else {
            return end;
        };
        match last {
            b'?' | b'!' | b'.' | b',' | b':' | b'*' | b'_' | b'~' | b'\'' | b'"' => end -= 1,
            b')' => {
                let url = &src[start..end];
                let open = url.iter().filter(|&&b| b == b'(').count();
                let close = url.iter().filter(|&&b| b == b')').count();
                if close > open {
                    end -= 1;
                } else {
                    return end;
                }
            }
            b';' => match entity_start(src, start, end - 1) {
                Some(amp) => end = amp,
                None => return end,
            },
            _ => return end,
        }
    }
}

/// Offset of the `&` starting an entity-like run `&[A-Za-z0-9]+` ending at `semi`.
fn entity_start(src: &[u8], start: usize, semi: usize) -> Option<usize> {
    let mut i = semi;
    while i > start && src[i - 1].is_ascii_alphanumeric() {
        i -= 1;
    }
    (i < semi && i > start && src[i - 1] == b'&').then(|| i - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pieces(text: &str) -> Vec<(bool, &str)> {
        split(text.as_bytes(), 0..text.len())
            .into_iter()
            .map(|p| match p {
                Piece::Text(r) => (false, &text[r]),
                Piece::Url(r) => (true, &text[r]),
            })
            .collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(pieces("no urls #1 here"), vec![(false, "no urls #1 here")]);
    }

    #[test]
    fn test_url_in_prose() {
        assert_eq!(
            pieces("see https://github.com/o/r/pull/1 for details"),
            vec![
                (false, "see "),
                (true, "https://github.com/o/r/pull/1"),
                (false, " for details"),
            ]
        );
    }

    #[test]
    fn test_url_only() {
        assert_eq!(
            pieces("https://github.com/o/r/issues/3#issuecomment-1"),
            vec![(true, "https://github.com/o/r/issues/3#issuecomment-1")]
        );
    }

    #[test]
    fn test_trailing_period_trimmed() {
        assert_eq!(
            pieces("at http://example.com/a."),
            vec![(false, "at "), (true, "http://example.com/a"), (false, ".")]
        );
    }

    #[test]
    fn test_unbalanced_paren_trimmed() {
        assert_eq!(
            pieces("(https://example.com/x)"),
            vec![(false, "("), (true, "https://example.com/x"), (false, ")")]
        );
    }

    #[test]
    fn test_balanced_paren_kept() {
        assert_eq!(
            pieces("https://en.wikipedia.org/wiki/Rust_(language)"),
            vec![(true, "https://en.wikipedia.org/wiki/Rust_(language)")]
        );
    }

    #[test]
    fn test_entity_like_suffix_trimmed() {
        assert_eq!(
            pieces("https://example.com/q&amp;"),
            vec![(true, "https://example.com/q"), (false, "&amp;")]
        );
    }

    #[test]
    fn test_plain_semicolon_kept() {
        assert_eq!(
            pieces("https://example.com/a;b;"),
            vec![(true, "https://example.com/a;b;")]
        );
    }

    #[test]
    fn test_www_requires_period() {
        assert_eq!(pieces("www.example"), vec![(false, "www.example")]);
        assert_eq!(
            pieces("www.example.com/#1"),
            vec![(true, "www.example.com/#1")]
        );
    }

    #[test]
    fn test_url_must_follow_whitespace_or_delimiter() {
        assert_eq!(
            pieces("xhttps://example.com"),
            vec![(false, "xhttps://example.com")]
        );
        assert_eq!(
            pieces("_https://example.com"),
            vec![(false, "_"), (true, "https://example.com")]
        );
    }

    #[test]
    fn test_scheme_without_domain() {
        assert_eq!(pieces("https:// x"), vec![(false, "https:// x")]);
    }

    #[test]
    fn test_stops_at_angle_bracket() {
        assert_eq!(
            pieces("https://example.com/a<b"),
            vec![(true, "https://example.com/a"), (false, "<b")]
        );
    }

    #[test]
    fn test_url_at_cell_start() {
        let src = b"|https://example.com/x|";
        assert_eq!(split(src, 1..22), vec![Piece::Url(1..22)]);
    }

    #[test]
    fn test_pipe_inside_text_is_not_a_lead() {
        assert_eq!(
            pieces("a|https://example.com"),
            vec![(false, "a|https://example.com")]
        );
    }

    #[test]
    fn test_respects_range() {
        let src = b"ab https://example.com cd";
        assert_eq!(
            split(src, 3..22),
            vec![Piece::Url(3..22)]
        );
    }
}
