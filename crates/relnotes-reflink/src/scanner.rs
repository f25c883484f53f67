//! Text segment scanning.

use std::ops::Range;

use crate::boundary::is_trigger;
use crate::context::LinkContext;

impl LinkContext<'_> {
    /// Find `#123`, `@user` and commit hash references in a text segment.
    ///
    /// The last byte of the segment is never a trigger: no reference is one
    /// byte long.
    pub(crate) fn scan_references(&mut self, range: Range<usize>) {
        let stop = range.end;
        let mut pos = range.start;

        while pos + 1 < stop {
            let window = &self.bytes()[pos..stop];
            let Some(i) = window.iter().position(|&b| is_trigger(b)) else {
                return;
            };
            if i + 1 >= window.len() {
                return;
            }

            let begin = pos + i;
            pos = match window[i] {
                b'#' => self.link_issue_ref(begin, stop),
                b'@' => self.link_user_ref(begin, stop),
                _ => self.link_commit_sha(begin, stop),
            };
        }
    }

    /// Find caller-configured external references in a text segment.
    pub(crate) fn scan_external(&mut self, range: Range<usize>) {
        let stop = range.end;
        let mut pos = range.start;
        while pos + 1 < stop {
            pos = self.link_external_ref(pos, stop);
        }
    }

    /// Link the earliest external reference in `[start, end)`.
    ///
    /// Patterns are tried in registration order; a later pattern only wins
    /// when its match starts strictly earlier. Returns `end` when nothing
    /// matches.
    ///
    /// Taking the earliest match, rather than the first pattern with any match
    /// in the window, is intentional: otherwise a high-priority match further
    /// along would skip every lower-priority reference before it.
    fn link_external_ref(&mut self, start: usize, end: usize) -> usize {
        // Slicing to `end` keeps matches inside the segment while the bytes
        // before `start` still take part in the leading word boundary.
        let haystack = &self.bytes()[..end];
        let linker = self.linker;

        let best = linker
            .external_references()
            .iter()
            .enumerate()
            .filter_map(|(idx, ext)| ext.find_at(haystack, start).map(|m| (idx, ext, m)))
            .min_by_key(|(idx, _, m)| (m.start(), *idx));

        let Some((idx, ext, m)) = best else {
            return end;
        };

        let reference = &self.src[m.start()..m.end()];
        self.spans
            .add_ranked(m.range(), ext.link(reference), idx + 1);
        m.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflinker;
    use pretty_assertions::assert_eq;

    fn scan(linker: &Reflinker, input: &str) -> String {
        let mut ctx = LinkContext::new(linker, input);
        ctx.scan_references(0..input.len());
        ctx.scan_external(0..input.len());
        ctx.finish()
    }

    fn linker() -> Reflinker {
        Reflinker::new("https://github.com/o/r").unwrap()
    }

    #[test]
    fn test_mixed_references() {
        assert_eq!(
            scan(&linker(), "#1 by @a, GH-2"),
            "[#1](https://github.com/o/r/issues/1) by [@a](https://github.com/a), \
             [GH-2](https://github.com/o/r/issues/2)"
        );
    }

    #[test]
    fn test_rejected_trigger_is_retried_one_byte_later() {
        // `##1` fails at the first `#` but the second one is a reference.
        assert_eq!(
            scan(&linker(), "##1"),
            "#[#1](https://github.com/o/r/issues/1)"
        );
    }

    #[test]
    fn test_hex_words_are_skipped() {
        let input = "added a feed cafe bead deadbeef";
        assert_eq!(scan(&linker(), input), input);
    }

    #[test]
    fn test_trailing_trigger_ignored() {
        assert_eq!(scan(&linker(), "ends with #"), "ends with #");
        assert_eq!(scan(&linker(), "@"), "@");
    }

    #[test]
    fn test_subrange_only() {
        let linker = linker();
        let input = "#1 #2";
        let mut ctx = LinkContext::new(&linker, input);
        ctx.scan_references(3..5);
        assert_eq!(ctx.finish(), "#1 [#2](https://github.com/o/r/issues/2)");
    }

    #[test]
    fn test_external_earliest_match_wins() {
        let mut builder = Reflinker::builder("https://github.com/o/r");
        builder
            .external_reference("JIRA-", "https://jira.example.com/browse/JIRA-<num>", false)
            .unwrap();
        let linker = builder.build().unwrap();

        assert_eq!(
            scan(&linker, "JIRA-1 and GH-2"),
            "[JIRA-1](https://jira.example.com/browse/JIRA-1) and \
             [GH-2](https://github.com/o/r/issues/2)"
        );
    }

    #[test]
    fn test_external_registration_order_breaks_ties() {
        let mut builder = Reflinker::builder("https://github.com/o/r");
        builder
            .external_reference("AB-", "https://first.example/<num>", false)
            .unwrap()
            .external_reference("AB-", "https://second.example/<num>", true)
            .unwrap();
        let linker = builder.build().unwrap();

        assert_eq!(scan(&linker, "AB-1"), "[AB-1](https://first.example/1)");
    }

    #[test]
    fn test_builtin_reference_beats_overlapping_external() {
        let mut builder = Reflinker::builder("https://github.com/o/r");
        builder
            .external_reference("x", "https://x.example/<num>", true)
            .unwrap();
        let linker = builder.build().unwrap();

        // `@xyz` is a mention; the external pattern also matches `xyz`.
        assert_eq!(scan(&linker, "@xyz"), "[@xyz](https://github.com/xyz)");
    }
}
