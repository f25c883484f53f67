//! Replacement spans and single-pass output reconstruction.

use std::ops::Range;

/// Rank of spans produced by the built-in matchers and the autolink classifier.
pub(crate) const BUILTIN_RANK: usize = 0;

/// A source byte range replaced by generated link markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReflinkSpan {
    /// First replaced byte.
    pub(crate) start: usize,
    /// One past the last replaced byte.
    pub(crate) end: usize,
    /// Markdown emitted in place of the range.
    pub(crate) replacement: String,
    /// Priority when spans overlap; lower wins.
    pub(crate) rank: usize,
}

/// Collects spans found during one linking call and applies them in one pass.
///
/// Spans may be added in any order. [`apply`](Self::apply) sorts them by
/// start offset and interleaves untouched source bytes with replacements.
#[derive(Debug, Default)]
pub(crate) struct SpanSet {
    items: Vec<ReflinkSpan>,
}

impl SpanSet {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a built-in replacement for `range`.
    pub(crate) fn add(&mut self, range: Range<usize>, replacement: impl Into<String>) {
        self.add_ranked(range, replacement, BUILTIN_RANK);
    }

    pub(crate) fn add_ranked(
        &mut self,
        range: Range<usize>,
        replacement: impl Into<String>,
        rank: usize,
    ) {
        debug_assert!(range.start < range.end);
        self.items.push(ReflinkSpan {
            start: range.start,
            end: range.end,
            replacement: replacement.into(),
            rank,
        });
    }

    /// Check if no span was registered.
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rebuild `src` with every non-overlapping span replaced.
    ///
    /// Returns `src` unchanged when nothing was registered. When two spans
    /// overlap, the one with the lower rank is kept; on equal rank the one
    /// starting first wins.
    ///
    /// This consumes the collector so spans cannot be applied twice.
    pub(crate) fn apply(self, src: &str) -> String {
        if self.is_empty() {
            return src.to_owned();
        }

        let found = self.items.len();
        let spans = self.resolve();
        let extra: usize = spans.iter().map(|s| s.replacement.len()).sum();
        let mut out = String::with_capacity(src.len() + extra);

        let mut pos = 0;
        for span in &spans {
            out.push_str(&src[pos..span.start]);
            out.push_str(&span.replacement);
            pos = span.end;
        }
        out.push_str(&src[pos..]);

        tracing::debug!(found, kept = spans.len(), "Applied reference links");
        out
    }

    /// Sort spans and drop those overlapping a higher-priority neighbour.
    fn resolve(mut self) -> Vec<ReflinkSpan> {
        self.items.sort_by_key(|s| (s.start, s.rank));

        let mut kept: Vec<ReflinkSpan> = Vec::with_capacity(self.items.len());
        for span in self.items {
            match kept.last() {
                Some(last) if span.start < last.end => {
                    if span.rank < last.rank {
                        tracing::trace!(
                            start = last.start,
                            end = last.end,
                            "Dropping overlapped lower-priority reference"
                        );
                        kept.pop();
                        kept.push(span);
                    } else {
                        tracing::trace!(
                            start = span.start,
                            end = span.end,
                            "Dropping overlapping reference"
                        );
                    }
                }
                _ => kept.push(span),
            }
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_returns_input() {
        let spans = SpanSet::new();
        assert_eq!(spans.apply("unchanged #x"), "unchanged #x");
    }

    #[test]
    fn test_single_span() {
        let mut spans = SpanSet::new();
        spans.add(0..2, "[#1](u)");
        assert_eq!(spans.apply("#1 a"), "[#1](u) a");
    }

    #[test]
    fn test_spans_applied_in_offset_order() {
        let mut spans = SpanSet::new();
        spans.add(6..8, "B");
        spans.add(0..2, "A");
        assert_eq!(spans.apply("#1 -- #2 end"), "A -- B end");
    }

    #[test]
    fn test_span_at_end_of_input() {
        let mut spans = SpanSet::new();
        spans.add(4..6, "X");
        assert_eq!(spans.apply("see #1"), "see X");
    }

    #[test]
    fn test_overlap_lower_rank_wins() {
        let mut spans = SpanSet::new();
        spans.add_ranked(0..6, "EXT", 1);
        spans.add_ranked(3..5, "BUILTIN", BUILTIN_RANK);
        assert_eq!(spans.apply("abcdefgh"), "abcBUILTINfgh");
    }

    #[test]
    fn test_overlap_equal_rank_first_wins() {
        let mut spans = SpanSet::new();
        spans.add_ranked(0..4, "A", 2);
        spans.add_ranked(2..6, "B", 2);
        assert_eq!(spans.apply("0123456789"), "A456789");
    }

    #[test]
    fn test_same_start_prefers_lower_rank() {
        let mut spans = SpanSet::new();
        spans.add_ranked(0..4, "EXT", 1);
        spans.add_ranked(0..4, "BUILTIN", BUILTIN_RANK);
        assert_eq!(spans.apply("GH-1"), "BUILTIN");
    }

    #[test]
    fn test_adjacent_spans_do_not_overlap() {
        let mut spans = SpanSet::new();
        spans.add(0..2, "A");
        spans.add(2..4, "B");
        assert_eq!(spans.apply("abcd"), "AB");
    }

    #[test]
    fn test_issue_link_in_sentence() {
        let mut spans = SpanSet::new();
        spans.add(6..9, "[#12](https://example.com/o/r/issues/12)");
        assert!(!spans.is_empty());
        assert_eq!(
            spans.apply("fixed #12 today"),
            "fixed [#12](https://example.com/o/r/issues/12) today"
        );
    }
}
