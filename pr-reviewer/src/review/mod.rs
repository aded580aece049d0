//! Evaluation stage: prompt → model → validated review.

pub mod parse;
pub mod prompt;
pub mod types;

use ai_llm_service::AnthropicService;
use tracing::debug;

use crate::errors::PrResult;
use crate::git_providers::types::FileDiff;
use crate::review::types::PrReview;

/// Evaluates a PR's file diffs with the model and returns the validated
/// review.
///
/// Fails fast on an empty file list; model transport failures and malformed
/// output surface as evaluation failures without retry.
pub async fn evaluate_changes(svc: &AnthropicService, files: &[FileDiff]) -> PrResult<PrReview> {
    let prompt = prompt::build_evaluation_prompt(files)?;
    debug!(
        "evaluate: prompt built (files={}, chars={})",
        files.len(),
        prompt.len()
    );

    let raw = svc.generate(&prompt).await?;
    debug!("evaluate: model replied ({} chars)", raw.len());

    let review = parse::parse_review_response(&raw)?;
    debug!(
        "evaluate: review parsed (comments={}, overall={})",
        review.review_comments.len(),
        review.overall_score()
    );

    Ok(review)
}
