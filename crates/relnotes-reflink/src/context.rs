//! Per-call scratch state.

use crate::Reflinker;
use crate::span::SpanSet;

/// Source and collected spans of one [`Reflinker::link`] call.
///
/// Owned by the call, so a shared [`Reflinker`] never holds mutable state.
pub(crate) struct LinkContext<'a> {
    pub(crate) linker: &'a Reflinker,
    pub(crate) src: &'a str,
    pub(crate) spans: SpanSet,
}

impl<'a> LinkContext<'a> {
    pub(crate) fn new(linker: &'a Reflinker, src: &'a str) -> Self {
        Self {
            linker,
            src,
            spans: SpanSet::new(),
        }
    }

    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Byte at `idx` is a boundary; positions past the end count as one.
    pub(crate) fn is_boundary_at(&self, idx: usize) -> bool {
        self.bytes()
            .get(idx)
            .is_none_or(|&b| crate::boundary::is_boundary(b))
    }

    /// Byte before `idx` is a boundary, or `idx` is the start of input.
    pub(crate) fn is_boundary_before(&self, idx: usize) -> bool {
        idx == 0 || self.is_boundary_at(idx - 1)
    }

    /// Rebuild the input with all collected links.
    pub(crate) fn finish(self) -> String {
        self.spans.apply(self.src)
    }
}
