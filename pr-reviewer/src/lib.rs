//! Public entry for the pr-reviewer pipeline.
//!
//! Single high-level function to run the whole evaluation for a submitted
//! pull request URL:
//!
//! 1) **Step 1 — Reference parsing**
//!    - Extract `(owner, repo, number)` from the PR URL (pure, no I/O)
//!
//! 2) **Step 2 — Diff fetch + snapshot**
//!    - Fetch the changed files (name, status, unified-diff patch)
//!    - Persist one new immutable snapshot (resubmissions add more, never
//!      overwrite)
//!
//! 3) **Step 3 — Evaluation**
//!    - Render the rubric prompt, call the model, repair/validate the JSON
//!      into a `PrReview`
//!
//! 4) **Step 4 — Publish (optional)**
//!    - Resolve head commit, map each comment's diff position, submit one
//!      review batch; degrade to an aggregated comment on host rejection
//!
//! The pipeline uses `tracing` for debug logging and avoids `async-trait`
//! and heap trait objects. Steps are strictly sequential: each depends on
//! the previous step's output, and there is no shared mutable state between
//! concurrent runs. Evaluation failures abort; a publish failure after a
//! successful evaluation is degraded, never allowed to discard the scores.

pub mod errors;
pub mod git_providers;
pub mod position;
pub mod publish;
pub mod reference;
pub mod review;
pub mod snapshot;

use std::time::Instant;
use tracing::{debug, error};

use ai_llm_service::{AnthropicService, LlmModelConfig};
use errors::PrResult;
use git_providers::{GitHubClient, ProviderConfig};
use git_providers::types::{DiffSnapshot, PrReference};

/// Final output of one evaluation run.
///
/// The review is always present on success; whether its comments made it
/// onto the PR is reported separately — "comments not posted" is a
/// degraded-but-successful outcome, distinct from "evaluation failed".
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// The validated model review (scores + comments).
    pub review: PrReview,
    /// Whether comments were posted (inline batch or aggregated fallback).
    pub posted_comments: bool,
    /// URL of the created review/comment, when the host returned one.
    pub review_url: Option<String>,
    /// Number of line comments the model produced.
    pub total_comments: usize,
}

/// Fetches a PR's changed files and persists one new [`DiffSnapshot`].
///
/// Exposed separately so callers can retrieve diffs without evaluating.
pub async fn fetch_diff(client: &GitHubClient, pr: &PrReference) -> PrResult<DiffSnapshot> {
    let files = client.list_pr_files(pr).await?;
    let snap = DiffSnapshot::new(pr.clone(), files);
    snapshot::store_snapshot(&snap).await?;
    Ok(snap)
}

/// Runs the full pipeline for a submitted PR URL and returns both the review
/// and the publish outcome.
///
/// This is the **single public entry** to call from an HTTP handler or any
/// other orchestrating workflow.
///
/// # Errors
/// Reference, fetch, and evaluation failures abort the run. Publish failures
/// do **not**: the already-computed review is returned with
/// `posted_comments: false` so the caller can still persist the scores.
pub async fn evaluate_and_review(
    provider_cfg: ProviderConfig,
    llm_cfg: LlmModelConfig,
    pr_url: &str,
) -> PrResult<ReviewOutcome> {
    // ---------------------------
    // Step 1: parse the reference
    // ---------------------------
    let t0 = Instant::now();
    let pr = reference::parse_pr_url(pr_url)?;
    debug!("step1: reference parsed {pr}");

    // -----------------------------
    // Step 2: diff fetch + snapshot
    // -----------------------------
    let client = GitHubClient::from_config(provider_cfg)?;
    let snap = fetch_diff(&client, &pr).await?;
    debug!(
        "step2: diff fetched, files={} snapshot={} ({} ms)",
        snap.files.len(),
        snap.id,
        t0.elapsed().as_millis()
    );

    // ------------------
    // Step 3: evaluation
    // ------------------
    let t3 = Instant::now();
    let svc = AnthropicService::new(llm_cfg)?;
    let review = review::evaluate_changes(&svc, &snap.files).await?;
    debug!(
        "step3: evaluated, overall={} comments={} ({} ms)",
        review.overall_score(),
        review.review_comments.len(),
        t3.elapsed().as_millis()
    );

    // -----------------------------
    // Step 4: publish (best effort)
    // -----------------------------
    let total_comments = review.review_comments.len();
    let (posted_comments, review_url) =
        match publish::publish_review(&client, &pr, &review.review_comments, &snap).await {
            Ok(result) => (result.posted, result.review_url),
            Err(e) => {
                // The evaluation already succeeded; surface the failure in
                // logs but hand the scores back to the caller regardless.
                error!("step4: publishing failed for {pr}: {e}");
                (false, None)
            }
        };
    debug!(
        "step4: publish done posted={} ({} ms total)",
        posted_comments,
        t0.elapsed().as_millis()
    );

    Ok(ReviewOutcome {
        review,
        posted_comments,
        review_url,
        total_comments,
    })
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use errors::{Error, EvaluationError, ProviderError, ReferenceError};
pub use git_providers::types::{ChangeStatus, FileDiff};
pub use position::{LINE_TOLERANCE, map_line_to_position};
pub use publish::PublishResult;
pub use reference::parse_pr_url;
pub use review::types::{PrReview, ReviewComment};
