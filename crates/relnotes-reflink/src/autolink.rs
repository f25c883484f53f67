//! Compact display for bare URLs pointing at the same forge.
//!
//! `https://github.com/o/r/pull/15` becomes `[#15](https://github.com/o/r/pull/15)`
//! and commit URLs become abbreviated hashes. URLs of other repositories on the
//! same host keep their `owner/repo` slug in the display text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::LinkContext;
use crate::refs::SHORT_HASH_LEN;

/// `/owner/repo/commit/<hash>`. A trailing fragment (diff anchor) does not match.
static COMMIT_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+/[^/]+)/commit/([[:xdigit:]]{7,})$").unwrap());

/// `/owner/repo/pull/<n>` or `/owner/repo/issues/<n>` with an optional fragment
/// such as `#issuecomment-1` or `#pullrequestreview-1`.
static ISSUE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+/[^/]+)/(?:pull|issues)/([0-9]+)(#.+)?$").unwrap());

/// Fragment prefix of links to a pull request review.
const REVIEW_FRAGMENT: &str = "#pullrequestreview-";

impl LinkContext<'_> {
    /// Replace a bare URL with a compact reference link when it points at an
    /// issue, pull request or commit on the session's forge.
    pub(crate) fn link_url(&mut self, range: Range<usize>) {
        let url = &self.src[range.clone()];
        let Some(path) = url.strip_prefix(self.linker.home_url()) else {
            return;
        };

        // <https://...> is written by hand; keep it as is
        let src = self.bytes();
        if range.start > 0 && src[range.start - 1] == b'<' && src.get(range.end) == Some(&b'>') {
            return;
        }

        let replacement = if let Some(caps) = COMMIT_PATH.captures(path) {
            let slug = &caps[1];
            let hash = &caps[2];
            let short = &hash[..hash.len().min(SHORT_HASH_LEN)];
            if self.linker.is_own_slug(slug) {
                format!("[`{short}`]({url})")
            } else {
                format!("[{slug}@`{short}`]({url})")
            }
        } else if let Some(caps) = ISSUE_PATH.captures(path) {
            let slug = &caps[1];
            let number = &caps[2];
            let note = match caps.get(3).map(|m| m.as_str()) {
                Some(fragment) if fragment.starts_with(REVIEW_FRAGMENT) => " (review)",
                Some(_) => " (comment)",
                None => "",
            };
            if self.linker.is_own_slug(slug) {
                format!("[#{number}{note}]({url})")
            } else {
                format!("[{slug}#{number}{note}]({url})")
            }
        } else {
            tracing::trace!(url, "Leaving unrecognized forge URL as is");
            return;
        };

        self.spans.add(range, replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflinker;
    use pretty_assertions::assert_eq;

    fn link(input: &str) -> String {
        let linker = Reflinker::new("https://github.com/o/r").unwrap();
        let mut ctx = LinkContext::new(&linker, input);
        ctx.link_url(0..input.len());
        ctx.finish()
    }

    #[test]
    fn test_own_issue() {
        assert_eq!(
            link("https://github.com/o/r/issues/11"),
            "[#11](https://github.com/o/r/issues/11)"
        );
    }

    #[test]
    fn test_own_pull_review() {
        assert_eq!(
            link("https://github.com/o/r/pull/15#pullrequestreview-1"),
            "[#15 (review)](https://github.com/o/r/pull/15#pullrequestreview-1)"
        );
    }

    #[test]
    fn test_issue_comment() {
        assert_eq!(
            link("https://github.com/o/r/issues/11#issuecomment-1346614286"),
            "[#11 (comment)](https://github.com/o/r/issues/11#issuecomment-1346614286)"
        );
    }

    #[test]
    fn test_pull_discussion_is_comment() {
        assert_eq!(
            link("https://github.com/o/r/pull/15#discussion_r1045110870"),
            "[#15 (comment)](https://github.com/o/r/pull/15#discussion_r1045110870)"
        );
    }

    #[test]
    fn test_foreign_pull_review() {
        assert_eq!(
            link("https://github.com/x/y/pull/15#pullrequestreview-1"),
            "[x/y#15 (review)](https://github.com/x/y/pull/15#pullrequestreview-1)"
        );
    }

    #[test]
    fn test_own_commit() {
        assert_eq!(
            link("https://github.com/o/r/commit/096c8152092281371e88265dd43b1b7d23a88453"),
            "[`096c815209`](https://github.com/o/r/commit/096c8152092281371e88265dd43b1b7d23a88453)"
        );
    }

    #[test]
    fn test_foreign_short_commit() {
        assert_eq!(
            link("https://github.com/x/y/commit/1234abc"),
            "[x/y@`1234abc`](https://github.com/x/y/commit/1234abc)"
        );
    }

    #[test]
    fn test_commit_with_fragment_untouched() {
        let url = "https://github.com/o/r/commit/096c8152092281371e88265dd43b1b7d23a88453#diff-ced928L226";
        assert_eq!(link(url), url);
    }

    #[test]
    fn test_similar_repo_name_is_foreign() {
        assert_eq!(
            link("https://github.com/o/r2/issues/1"),
            "[o/r2#1](https://github.com/o/r2/issues/1)"
        );
    }

    #[test]
    fn test_other_host_untouched() {
        let url = "https://gitlab.com/o/r/issues/1";
        assert_eq!(link(url), url);
    }

    #[test]
    fn test_host_prefix_is_not_enough() {
        let url = "https://github.com.evil.example/o/r/issues/1";
        assert_eq!(link(url), url);
    }

    #[test]
    fn test_unrecognized_path_untouched() {
        let url = "https://github.com/o/r/releases/tag/v1.0.0";
        assert_eq!(link(url), url);
    }

    #[test]
    fn test_angle_brackets_untouched() {
        let linker = Reflinker::new("https://github.com/o/r").unwrap();
        let input = "<https://github.com/o/r/issues/1>";
        let mut ctx = LinkContext::new(&linker, input);
        ctx.link_url(1..input.len() - 1);
        assert_eq!(ctx.finish(), input);
    }
}
