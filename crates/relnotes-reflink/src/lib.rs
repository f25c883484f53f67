//! Reference linking for release-note markdown.
//!
//! Turns bare references in a markdown document into links pointing at one
//! repository on a GitHub-like forge:
//!
//! - `#123` becomes `[#123](<repo>/issues/123)`
//! - `@user` becomes `[@user](<host>/user)`
//! - a 40-digit commit hash becomes ``[`0123456789`](<repo>/commit/<hash>)``
//! - caller-configured prefixes such as `JIRA-123` link to external trackers
//! - bare issue, pull request and commit URLs on the same host get a compact
//!   display text
//!
//! Only plain text is rewritten. Code spans, code blocks, links and images
//! are left alone, and every byte outside a recognized reference is copied
//! unchanged.
//!
//! # Architecture
//!
//! The document is parsed once with pulldown-cmark. A walker merges text
//! events into source ranges and splits bare URLs out of them. Text ranges
//! are scanned for references, URLs are classified against the forge host,
//! and the collected replacement spans are applied in a single pass.
//!
//! # Example
//!
//! ```
//! use relnotes_reflink::Reflinker;
//!
//! let mut builder = Reflinker::builder("https://github.com/owner/repo");
//! builder.external_reference("JIRA-", "https://jira.example.com/browse/JIRA-<num>", false)?;
//! let linker = builder.build()?;
//!
//! assert_eq!(
//!     linker.link("Fixes JIRA-7"),
//!     "Fixes [JIRA-7](https://jira.example.com/browse/JIRA-7)"
//! );
//! # Ok::<(), relnotes_reflink::ReflinkError>(())
//! ```

mod autolink;
mod boundary;
mod context;
mod error;
mod external;
mod linkify;
mod reflinker;
mod refs;
mod scanner;
mod span;
mod walker;

pub use boundary::is_boundary;
pub use error::ReflinkError;
pub use external::{ExternalReference, URL_PLACEHOLDER};
pub use reflinker::{Reflinker, ReflinkerBuilder};
