//! Session configuration errors.

/// Error raised while building a [`Reflinker`](crate::Reflinker).
///
/// Linking itself never fails; every error surfaces at configuration time.
#[derive(Debug, thiserror::Error)]
pub enum ReflinkError {
    /// Repository URL is not of the form `scheme://host/owner/repo`.
    #[error("Invalid repository URL {url:?}: {reason}")]
    InvalidRepositoryUrl {
        /// URL as given by the caller.
        url: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// External reference registered with an empty prefix.
    #[error("External reference prefix cannot be empty")]
    EmptyPrefix,
    /// External reference URL template lacks the `<num>` placeholder.
    #[error("External reference URL for prefix {prefix:?} must contain {placeholder}")]
    MissingPlaceholder {
        /// Prefix the template was registered for.
        prefix: String,
        /// Expected placeholder text.
        placeholder: &'static str,
    },
    /// Prefix could not be compiled into a matcher.
    #[error("Invalid external reference pattern: {0}")]
    Pattern(#[from] regex::Error),
}
