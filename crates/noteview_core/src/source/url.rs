//! URL screening and auto-load discovery.

use crate::source::{SourceError, SourceResult};
use reqwest::Url;

const SUPPORTED_URL_MARKERS: &[&str] = &[".json", "github", "pastebin"];
const AUTO_LOAD_PARAMS: &[&str] = &["url", "json"];

/// Validates a user-entered payload URL.
///
/// The URL must parse as absolute and mention `.json`, `github` or
/// `pastebin` somewhere.
pub fn check_source_url(input: &str) -> SourceResult<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SourceError::InvalidUrl(trimmed.to_string()));
    }
    let url = Url::parse(trimmed).map_err(|_| SourceError::InvalidUrl(trimmed.to_string()))?;
    if !SUPPORTED_URL_MARKERS
        .iter()
        .any(|marker| trimmed.contains(marker))
    {
        return Err(SourceError::UnsupportedUrl(trimmed.to_string()));
    }
    Ok(url)
}

/// Returns the payload URL requested through a page's query string.
///
/// `url` wins over `json`; blank values are ignored.
pub fn auto_load_url(page_url: &Url) -> Option<String> {
    AUTO_LOAD_PARAMS.iter().find_map(|param| {
        page_url
            .query_pairs()
            .find(|(name, value)| name == *param && !value.trim().is_empty())
            .map(|(_, value)| value.into_owned())
    })
}
