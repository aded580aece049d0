//! GitHub provider (REST, api-version 2022-11-28).
//!
//! Endpoints used:
//! - GET  /repos/{owner}/{repo}/pulls/{number}/files   (field "patch" is unified diff)
//! - GET  /repos/{owner}/{repo}/pulls/{number}         (head commit SHA)
//! - POST /repos/{owner}/{repo}/pulls/{number}/reviews (inline review batch)
//! - POST /repos/{owner}/{repo}/issues/{number}/comments (general fallback comment)
//!
//! Status mapping: 404→NotFound, 401→Unauthorized, 422 on review creation →
//! Unprocessable (recoverable), any other non-2xx → Upstream carrying the
//! host's status and body. No retries; the caller decides.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PrResult, ProviderError};
use crate::git_providers::types::{FileDiff, PrReference};
use crate::git_providers::ProviderConfig;

/// How many files to request per page; PRs beyond this are truncated by the
/// host and would need paging, which evaluation does not attempt.
const FILES_PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // "https://api.github.com"
}

impl GitHubClient {
    /// Constructs a GitHub client with one long-lived `reqwest` instance.
    ///
    /// The client is shared across all calls of a pipeline run (and across
    /// runs when the caller keeps it around), with explicit connect/request
    /// timeouts so a stalled host fails closed instead of hanging.
    pub fn from_config(cfg: ProviderConfig) -> PrResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("pr-reviewer/0.1"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cfg.token))
                .map_err(|e| ProviderError::Network(format!("bad token header: {e}")))?,
        );

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_api: cfg.base_api.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the list of changed files (name, status, unified-diff patch).
    ///
    /// A missing `patch` field (binary or oversized files) becomes an empty
    /// string, never an error.
    pub async fn list_pr_files(&self, pr: &PrReference) -> PrResult<Vec<FileDiff>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/files?per_page={}",
            self.base_api, pr.owner, pr.repo, pr.number, FILES_PER_PAGE
        );
        debug!("GET {url}");

        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp).await?;

        let raw: Vec<GitHubPrFile> = resp.json().await.map_err(decode_err)?;
        let files = raw
            .into_iter()
            .map(|f| FileDiff {
                filename: f.filename,
                status: f.status,
                patch: f.patch.unwrap_or_default(),
            })
            .collect();

        Ok(files)
    }

    /// Resolves the PR's current head commit SHA.
    pub async fn get_head_sha(&self, pr: &PrReference) -> PrResult<String> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_api, pr.owner, pr.repo, pr.number
        );
        debug!("GET {url}");

        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp).await?;

        let raw: GitHubPr = resp.json().await.map_err(decode_err)?;
        Ok(raw.head.sha)
    }

    /// Submits all inline comments as a single review batch.
    ///
    /// # Errors
    /// [`ProviderError::Unprocessable`] when the host returns 422 (a
    /// referenced line is not part of the diff); the publisher recovers from
    /// this locally. Other failures map like every host call.
    pub async fn create_review(
        &self,
        pr: &PrReference,
        head_sha: &str,
        body: &str,
        comments: &[InlineComment<'_>],
    ) -> PrResult<ReviewCreated> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.base_api, pr.owner, pr.repo, pr.number
        );
        debug!("POST {url} (comments={})", comments.len());

        let payload = CreateReviewRequest {
            commit_id: head_sha,
            body,
            event: "COMMENT",
            comments,
        };

        let resp = self.http.post(&url).json(&payload).send().await?;

        if resp.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Unprocessable { body }.into());
        }
        let resp = check_status(resp).await?;

        let raw: GitHubHtmlUrl = resp.json().await.map_err(decode_err)?;
        Ok(ReviewCreated {
            html_url: raw.html_url,
        })
    }

    /// Posts a general (non-positional) comment on the PR's conversation.
    pub async fn create_issue_comment(
        &self,
        pr: &PrReference,
        body: &str,
    ) -> PrResult<CommentCreated> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_api, pr.owner, pr.repo, pr.number
        );
        debug!("POST {url}");

        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let raw: GitHubHtmlUrl = resp.json().await.map_err(decode_err)?;
        Ok(CommentCreated {
            html_url: raw.html_url,
        })
    }
}

/// Maps the host's status codes onto the provider error taxonomy; passes
/// successful responses through for body decoding.
async fn check_status(resp: Response) -> Result<Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(match status {
        StatusCode::NOT_FOUND => ProviderError::NotFound,
        StatusCode::UNAUTHORIZED => ProviderError::Unauthorized,
        _ => ProviderError::Upstream {
            status: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        },
    })
}

fn decode_err(e: reqwest::Error) -> ProviderError {
    ProviderError::Network(format!("invalid response body: {e}"))
}

/// One inline comment in a review batch, addressed by new-file line + side.
///
/// The review endpoint accepts either raw positions or line/side pairs; the
/// publisher uses line/side so that comments whose position could not be
/// computed are still submitted.
#[derive(Debug, Serialize)]
pub struct InlineComment<'a> {
    pub path: &'a str,
    pub line: u32,
    pub side: &'static str,
    pub body: &'a str,
}

/// Identifiers of a created review.
#[derive(Debug, Clone)]
pub struct ReviewCreated {
    pub html_url: Option<String>,
}

/// Identifiers of a created general comment.
#[derive(Debug, Clone)]
pub struct CommentCreated {
    pub html_url: Option<String>,
}

/// --- GitHub response/request shapes (subset of fields we actually use) ---

#[derive(Debug, Serialize)]
struct CreateReviewRequest<'a> {
    commit_id: &'a str,
    body: &'a str,
    event: &'a str,
    comments: &'a [InlineComment<'a>],
}

#[derive(Debug, Deserialize)]
struct GitHubPrFile {
    filename: String,
    status: crate::git_providers::types::ChangeStatus,
    #[serde(default)]
    patch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubPr {
    head: GitHubHead,
}

#[derive(Debug, Deserialize)]
struct GitHubHead {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitHubHtmlUrl {
    #[serde(default)]
    html_url: Option<String>,
}
