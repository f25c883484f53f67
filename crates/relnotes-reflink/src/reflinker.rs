//! Linking session for one target repository.

use crate::context::LinkContext;
use crate::external::{DEFAULT_PREFIX, ExternalReference, URL_PLACEHOLDER};
use crate::walker::{self, Node, WalkStatus};
use crate::ReflinkError;

/// Replaces references in release-note markdown with links into one repository.
///
/// A `Reflinker` is immutable once built and holds no per-call state, so one
/// instance can be shared across threads.
///
/// # Example
///
/// ```
/// use relnotes_reflink::Reflinker;
///
/// let linker = Reflinker::new("https://github.com/owner/repo").unwrap();
/// assert_eq!(
///     linker.link("Fixed #12 (thanks @alice)"),
///     "Fixed [#12](https://github.com/owner/repo/issues/12) \
///      (thanks [@alice](https://github.com/alice))"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Reflinker {
    repository_url: String,
    home_url: String,
    slug: String,
    external: Vec<ExternalReference>,
}

impl Reflinker {
    /// Create a session with only the default `GH-<num>` external reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReflinkError::InvalidRepositoryUrl`] if the URL is not of the
    /// form `scheme://host/owner/repo`.
    pub fn new(repository_url: impl Into<String>) -> Result<Self, ReflinkError> {
        Self::builder(repository_url).build()
    }

    /// Start configuring a session for `repository_url`.
    #[must_use]
    pub fn builder(repository_url: impl Into<String>) -> ReflinkerBuilder {
        ReflinkerBuilder {
            repository_url: repository_url.into(),
            external: Vec::new(),
        }
    }

    /// Repository URL without trailing slash, e.g. `https://github.com/owner/repo`.
    #[must_use]
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Scheme and host of the repository URL, e.g. `https://github.com`.
    #[must_use]
    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// External references in priority order, starting with `GH-`.
    #[must_use]
    pub fn external_references(&self) -> &[ExternalReference] {
        &self.external
    }

    /// Owner and repository names are case-insensitive on the forge.
    pub(crate) fn is_own_slug(&self, slug: &str) -> bool {
        slug.eq_ignore_ascii_case(&self.slug)
    }

    /// Replace every recognized reference in `markdown` with a link.
    ///
    /// Text inside code spans, code blocks, links and images is left alone.
    /// When nothing is recognized the input is returned unchanged.
    #[must_use]
    pub fn link(&self, markdown: &str) -> String {
        let mut ctx = LinkContext::new(self, markdown);

        walker::walk(markdown, |node| match node {
            Node::Text(range) => {
                ctx.scan_references(range.clone());
                ctx.scan_external(range);
                WalkStatus::Continue
            }
            Node::AutoLink(range) => {
                ctx.link_url(range);
                WalkStatus::SkipChildren
            }
            Node::CodeSpan | Node::Link | Node::CodeBlock => WalkStatus::SkipChildren,
            Node::Container => WalkStatus::Continue,
        });

        ctx.finish()
    }
}

/// Builder for [`Reflinker`].
///
/// External references are validated as they are registered so configuration
/// mistakes surface before any markdown is processed.
#[derive(Debug)]
pub struct ReflinkerBuilder {
    repository_url: String,
    external: Vec<ExternalReference>,
}

impl ReflinkerBuilder {
    /// Register an external reference after those already registered.
    ///
    /// `url_template` must contain `<num>`, which is replaced by the matched
    /// suffix. See [`ExternalReference::new`] for the matching rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty, the template lacks the
    /// placeholder, or the pattern cannot be compiled.
    pub fn external_reference(
        &mut self,
        prefix: impl Into<String>,
        url_template: impl Into<String>,
        alphanumeric: bool,
    ) -> Result<&mut Self, ReflinkError> {
        self.external
            .push(ExternalReference::new(prefix, url_template, alphanumeric)?);
        Ok(self)
    }

    /// Validate the repository URL and finish the session.
    ///
    /// # Errors
    ///
    /// Returns [`ReflinkError::InvalidRepositoryUrl`] if the URL lacks a scheme,
    /// host or repository path.
    pub fn build(self) -> Result<Reflinker, ReflinkError> {
        let repository_url = self.repository_url.trim_end_matches('/').to_owned();
        let (home_url, slug) = split_repository_url(&repository_url)?;

        let default = ExternalReference::new(
            DEFAULT_PREFIX,
            format!("{repository_url}/issues/{URL_PLACEHOLDER}"),
            false,
        )?;
        let mut external = Vec::with_capacity(self.external.len() + 1);
        external.push(default);
        external.extend(self.external);

        tracing::debug!(
            repository = %repository_url,
            external_references = external.len(),
            "Built reference linker"
        );

        Ok(Reflinker {
            repository_url,
            home_url,
            slug,
            external,
        })
    }
}

/// Split `scheme://host/owner/repo` into `scheme://host` and `owner/repo`.
fn split_repository_url(url: &str) -> Result<(String, String), ReflinkError> {
    let invalid = |reason: &'static str| ReflinkError::InvalidRepositoryUrl {
        url: url.to_owned(),
        reason,
    };

    let (scheme, rest) = url.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
    if scheme.is_empty() {
        return Err(invalid("missing scheme"));
    }
    let (host, path) = rest
        .split_once('/')
        .ok_or_else(|| invalid("missing repository path"))?;
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    if path.is_empty() {
        return Err(invalid("missing repository path"));
    }

    Ok((format!("{scheme}://{host}"), path.to_owned()))
}
