//! Collaborators that obtain raw payload text.
//!
//! # Responsibility
//! - Fetch payload text over HTTP (`http`) or from disk (`file`).
//! - Screen user-entered URLs and discover auto-load URLs (`url`).
//! - Classify transport failures into [`SourceError`].
//!
//! # Invariants
//! - Collaborators only return text; parsing belongs to `crate::service`.
//! - Failures are terminal for one attempt; nothing here retries.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod file;
pub mod http;
pub mod url;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure raised while obtaining payload text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// HTTP 404.
    NotFound,
    /// HTTP 403.
    AccessDenied,
    /// Any other non-success HTTP status.
    FetchFailed { status: u16 },
    /// Response body was empty or whitespace only.
    EmptyPayload,
    /// Request blocked by a same-origin policy in the hosting runtime.
    ///
    /// Produced by browser-hosted fetchers only.
    CrossOriginBlocked,
    /// Connection, TLS, timeout or client setup failure.
    Transport(String),
    /// Local file could not be read.
    ReadError { path: PathBuf, message: String },
    /// Input is blank or not a parseable absolute URL.
    InvalidUrl(String),
    /// URL does not look like a JSON document or a supported host.
    UnsupportedUrl(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "JSON file not found"),
            Self::AccessDenied => write!(f, "access denied"),
            Self::FetchFailed { status } => write!(f, "failed to fetch ({status})"),
            Self::EmptyPayload => write!(f, "empty file"),
            Self::CrossOriginBlocked => write!(
                f,
                "cross-origin request blocked: the server does not allow cross-origin requests"
            ),
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::ReadError { path, message } => {
                write!(f, "error reading file `{}`: {message}", path.display())
            }
            Self::InvalidUrl(value) => write!(f, "please enter a valid URL: `{value}`"),
            Self::UnsupportedUrl(value) => write!(
                f,
                "URL should point to a JSON file or supported service: `{value}`"
            ),
        }
    }
}

impl Error for SourceError {}

/// Network-fetch collaborator.
///
/// Implementations return the response body text or a classified failure.
pub trait NoteFetcher {
    fn fetch(&self, url: &str) -> SourceResult<String>;
}

impl<F: NoteFetcher + ?Sized> NoteFetcher for &F {
    fn fetch(&self, url: &str) -> SourceResult<String> {
        (**self).fetch(url)
    }
}

/// Rejects blank bodies the way every fetcher should.
pub fn require_non_empty(body: String) -> SourceResult<String> {
    if body.trim().is_empty() {
        return Err(SourceError::EmptyPayload);
    }
    Ok(body)
}
