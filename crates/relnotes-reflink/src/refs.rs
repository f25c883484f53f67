//! Built-in reference grammars: `#123`, `@user` and full commit hashes.
//!
//! Each `link_*` method takes the offset of its trigger byte and the end of
//! the text segment, records a span on success, and returns the offset to
//! resume scanning from. The returned offset is always past `begin`.

use crate::boundary::{is_boundary, is_hash_char, is_user_name_char};
use crate::context::LinkContext;

/// Length of a full SHA-1 commit hash in hex digits.
pub(crate) const HASH_LEN: usize = 40;

/// Hex digits shown for an abbreviated commit hash.
pub(crate) const SHORT_HASH_LEN: usize = 10;

impl LinkContext<'_> {
    /// End of an issue reference `#123` starting at `begin`.
    fn issue_ref_end(&self, begin: usize, end: usize) -> Option<usize> {
        // foo#1 is not a reference
        if !self.is_boundary_before(begin) || end - begin < 2 {
            return None;
        }

        let src = self.bytes();
        for i in begin + 1..end {
            let b = src[i];
            if b.is_ascii_digit() {
                continue;
            }
            if i == begin + 1 || !is_boundary(b) {
                return None;
            }
            return Some(i);
        }

        // Digits run to the end of the segment
        self.is_boundary_at(end).then_some(end)
    }

    pub(crate) fn link_issue_ref(&mut self, begin: usize, end: usize) -> usize {
        let Some(e) = self.issue_ref_end(begin, end) else {
            return begin + 1;
        };

        let reference = &self.src[begin..e];
        // GitHub redirects issue URLs to pull requests, so one form covers both
        let replacement = format!(
            "[{reference}]({}/issues/{})",
            self.linker.repository_url(),
            &reference[1..]
        );
        self.spans.add(begin..e, replacement);
        e
    }

    /// End of a user mention `@name` starting at `begin`.
    ///
    /// Names are alphanumeric with single inner hyphens and may not be
    /// followed by `/` (`@org/team` is a team, not a user).
    fn user_ref_end(&self, begin: usize, end: usize) -> Option<usize> {
        // foo@bar is an email-like token; -@foo is fine
        if !self.is_boundary_before(begin) || end - begin < 2 {
            return None;
        }

        let src = self.bytes();
        let first = src[begin + 1];
        if !is_user_name_char(first) || first == b'-' {
            return None;
        }

        for i in begin + 2..end {
            let b = src[i];
            if b == b'-' && src[i - 1] == b'-' {
                return None;
            }
            if is_user_name_char(b) {
                continue;
            }
            if b == b'/' || src[i - 1] == b'-' {
                return None;
            }
            return Some(i);
        }

        if src[end - 1] == b'-' {
            return None;
        }
        match src.get(end) {
            Some(&b) if !is_boundary(b) || b == b'/' => None,
            _ => Some(end),
        }
    }

    pub(crate) fn link_user_ref(&mut self, begin: usize, end: usize) -> usize {
        let Some(e) = self.user_ref_end(begin, end) else {
            return begin + 1;
        };

        let mention = &self.src[begin..e];
        let replacement = format!("[{mention}]({}/{})", self.linker.home_url(), &mention[1..]);
        self.spans.add(begin..e, replacement);
        e
    }

    /// Link a 40-digit commit hash starting at `begin`.
    ///
    /// Shorter hex runs are skipped entirely; `begin` itself was already
    /// checked to be a hex digit.
    pub(crate) fn link_commit_sha(&mut self, begin: usize, end: usize) -> usize {
        let src = self.bytes();
        for i in 1..HASH_LEN {
            if begin + i >= end || !is_hash_char(src[begin + i]) {
                return begin + i;
            }
        }

        let hash_end = begin + HASH_LEN;
        if self.is_boundary_before(begin) && self.is_boundary_at(hash_end) {
            let hash = &self.src[begin..hash_end];
            let replacement = format!(
                "[`{}`]({}/commit/{hash})",
                &hash[..SHORT_HASH_LEN],
                self.linker.repository_url()
            );
            self.spans.add(begin..hash_end, replacement);
        }
        hash_end
    }
}
