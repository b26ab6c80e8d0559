//! Blocking HTTP fetch collaborator.
//!
//! # Invariants
//! - Status mapping: 404 -> `NotFound`, 403 -> `AccessDenied`, any other
//!   non-success -> `FetchFailed`.
//! - A blank success body is `EmptyPayload`.

use crate::source::{require_non_empty, NoteFetcher, SourceError, SourceResult};
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Options for [`HttpNoteFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            use_system_proxy: true,
        }
    }
}

/// `reqwest`-backed fetcher.
pub struct HttpNoteFetcher {
    client: Client,
}

impl HttpNoteFetcher {
    pub fn new(config: &FetchConfig) -> SourceResult<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl NoteFetcher for HttpNoteFetcher {
    fn fetch(&self, url: &str) -> SourceResult<String> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .map_err(|err| {
                warn!("event=fetch module=source status=error stage=send");
                SourceError::Transport(err.to_string())
            })?;

        let status = response.status();
        if let Some(err) = classify_status(status) {
            warn!(
                "event=fetch module=source status=error http_status={}",
                status.as_u16()
            );
            return Err(err);
        }

        let body = response
            .text()
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        let body = require_non_empty(body)?;
        info!(
            "event=fetch module=source status=ok http_status={} bytes={}",
            status.as_u16(),
            body.len()
        );
        Ok(body)
    }
}

/// Maps a response status onto the failure taxonomy; `None` on success.
pub fn classify_status(status: StatusCode) -> Option<SourceError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => SourceError::NotFound,
        StatusCode::FORBIDDEN => SourceError::AccessDenied,
        other => SourceError::FetchFailed {
            status: other.as_u16(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::classify_status;
    use crate::source::SourceError;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping() {
        assert_eq!(classify_status(StatusCode::OK), None);
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            Some(SourceError::NotFound)
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN),
            Some(SourceError::AccessDenied)
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(SourceError::FetchFailed { status: 500 })
        );
        assert_eq!(
            classify_status(StatusCode::MOVED_PERMANENTLY),
            Some(SourceError::FetchFailed { status: 301 })
        );
    }
}
