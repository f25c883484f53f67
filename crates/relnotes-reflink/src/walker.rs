//! Markdown structure walk over pulldown-cmark offset events.
//!
//! Exposes the document as a closed set of [`Node`] kinds with source byte
//! ranges. The visitor decides per node whether to descend into it.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::linkify::{self, Piece};

/// A node reported to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    /// Source text outside any URL.
    Text(Range<usize>),
    /// Bare URL found in text.
    AutoLink(Range<usize>),
    /// Inline code.
    CodeSpan,
    /// Link or image of any kind, including `<...>` autolinks.
    Link,
    /// Fenced or indented code block.
    CodeBlock,
    /// Any other block or inline container.
    Container,
}

/// Traversal control returned by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkStatus {
    /// Visit the node's children.
    Continue,
    /// Skip everything until the node is closed.
    SkipChildren,
}

/// Parser options matching the GitHub flavor of release notes.
fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Walk `src`, calling `visit` for every node in document order.
///
/// Adjacent text events with contiguous source ranges are merged into one
/// [`Node::Text`] before bare URLs are split out of it.
pub(crate) fn walk(src: &str, mut visit: impl FnMut(Node) -> WalkStatus) {
    let mut pending: Option<Range<usize>> = None;
    // Open tags inside a skipped subtree, including the skipped node itself.
    let mut skip_depth = 0usize;

    for (event, range) in Parser::new_ext(src, options()).into_offset_iter() {
        if let Event::Text(_) = event {
            if skip_depth > 0 {
                continue;
            }
            pending = match pending.take() {
                Some(prev) if prev.end == range.start => Some(prev.start..range.end),
                Some(prev) => {
                    flush(src, prev, &mut visit);
                    Some(range)
                }
                None => Some(range),
            };
            continue;
        }

        if let Some(prev) = pending.take() {
            flush(src, prev, &mut visit);
        }

        match event {
            Event::Start(tag) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else if visit(classify(&tag)) == WalkStatus::SkipChildren {
                    skip_depth = 1;
                }
            }
            Event::End(_) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Code(_) if skip_depth == 0 => {
                visit(Node::CodeSpan);
            }
            _ => {}
        }
    }

    if let Some(prev) = pending.take() {
        flush(src, prev, &mut visit);
    }
}

fn classify(tag: &Tag<'_>) -> Node {
    match tag {
        Tag::Link { .. } | Tag::Image { .. } => Node::Link,
        Tag::CodeBlock(_) => Node::CodeBlock,
        _ => Node::Container,
    }
}

/// Report a merged text range as text and URL nodes.
fn flush(src: &str, range: Range<usize>, visit: &mut impl FnMut(Node) -> WalkStatus) {
    for piece in linkify::split(src.as_bytes(), range) {
        let node = match piece {
            Piece::Text(r) => Node::Text(r),
            Piece::Url(r) => Node::AutoLink(r),
        };
        visit(node);
    }
}
