//! Caller-configured external references such as `JIRA-123`.
//!
//! Mirrors the repository autolink settings of the hosting service: a literal
//! prefix followed by a numeric or alphanumeric suffix, mapped to a URL
//! template in which `<num>` is replaced by the suffix.

use regex::bytes::{Match, Regex};

use crate::ReflinkError;

/// Placeholder substituted with the matched suffix in URL templates.
pub const URL_PLACEHOLDER: &str = "<num>";

/// Prefix of the external reference every session registers first.
pub(crate) const DEFAULT_PREFIX: &str = "GH-";

/// A compiled external reference pattern.
#[derive(Debug, Clone)]
pub struct ExternalReference {
    prefix: String,
    url_template: String,
    pattern: Regex,
}

impl ExternalReference {
    /// Compile an external reference.
    ///
    /// With `alphanumeric` unset the suffix must be a run of digits followed by
    /// a word boundary. With it set, the suffix is any run of ASCII letters,
    /// digits and `_`. The prefix must follow a word boundary in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty, the template has no
    /// [`URL_PLACEHOLDER`], or the pattern fails to compile.
    pub fn new(
        prefix: impl Into<String>,
        url_template: impl Into<String>,
        alphanumeric: bool,
    ) -> Result<Self, ReflinkError> {
        let prefix = prefix.into();
        let url_template = url_template.into();

        if prefix.is_empty() {
            return Err(ReflinkError::EmptyPrefix);
        }
        if !url_template.contains(URL_PLACEHOLDER) {
            return Err(ReflinkError::MissingPlaceholder {
                prefix,
                placeholder: URL_PLACEHOLDER,
            });
        }

        let suffix = if alphanumeric {
            r"[a-zA-Z0-9_]+"
        } else {
            r"[0-9]+(?-u:\b)"
        };
        let pattern = Regex::new(&format!(r"(?-u:\b){}{suffix}", regex::escape(&prefix)))?;

        Ok(Self {
            prefix,
            url_template,
            pattern,
        })
    }

    /// Literal prefix, e.g. `JIRA-`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// URL template containing [`URL_PLACEHOLDER`].
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Find the first match in `haystack` at or after `start`.
    ///
    /// Bytes before `start` still count for the leading word boundary.
    pub(crate) fn find_at<'h>(&self, haystack: &'h [u8], start: usize) -> Option<Match<'h>> {
        self.pattern.find_at(haystack, start)
    }

    /// Render the link for a matched reference such as `JIRA-12`.
    pub(crate) fn link(&self, reference: &str) -> String {
        let suffix = &reference[self.prefix.len()..];
        let url = self.url_template.replace(URL_PLACEHOLDER, suffix);
        format!("[{reference}]({url})")
    }
}
