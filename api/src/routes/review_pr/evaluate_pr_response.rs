use serde::Serialize;

use pr_reviewer::PrReview;

/// Response payload for the evaluate-and-comment route.
#[derive(Debug, Serialize)]
pub struct EvaluatePrResponse {
    /// The evaluation results with scores and line-specific comments.
    pub review: PrReview,
    /// Derived overall score in 0.0–100.0.
    pub overall_score: f64,
    /// Whether comments were posted on the PR.
    pub comments_posted: bool,
    /// URL of the posted review (if posted).
    pub review_url: Option<String>,
    /// Number of line comments produced by the evaluation.
    pub total_comments: usize,
}
