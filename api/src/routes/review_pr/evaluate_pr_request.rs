use serde::Deserialize;

/// Request payload for PR evaluation and diff-fetch routes.
#[derive(Debug, Deserialize)]
pub struct EvaluatePrRequest {
    /// Full PR URL, e.g. "https://github.com/owner/repo/pull/42".
    pub pr_url: String,
}
