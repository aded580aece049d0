//! PR URL parsing.
//!
//! Pure: no I/O, no network. A reference is accepted only when the URL path
//! is exactly `/<owner>/<repo>/pull/<number>` (trailing slash tolerated).

use crate::errors::ReferenceError;
use crate::git_providers::types::PrReference;

/// Parses a PR URL into a [`PrReference`].
///
/// Accepts `http(s)://<host>/<owner>/<repo>/pull/<number>[/]`. The host is
/// not validated beyond being non-empty, so self-hosted installations work.
///
/// # Errors
/// [`ReferenceError::InvalidFormat`] for any other shape.
pub fn parse_pr_url(url: &str) -> Result<PrReference, ReferenceError> {
    let invalid = || ReferenceError::InvalidFormat(url.to_string());

    let trimmed = url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(invalid)?;

    let mut segments = rest.split('/');

    let host = segments.next().ok_or_else(invalid)?;
    let owner = segments.next().unwrap_or_default();
    let repo = segments.next().unwrap_or_default();
    let pull = segments.next().unwrap_or_default();
    let number = segments.next().unwrap_or_default();

    if host.is_empty() || owner.is_empty() || repo.is_empty() || pull != "pull" {
        return Err(invalid());
    }

    let number: u64 = number.parse().map_err(|_| invalid())?;

    // Anything after the number (e.g. "/files") is not a PR reference.
    if segments.next().is_some() {
        return Err(invalid());
    }

    Ok(PrReference {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
    })
}
