//! Review result types: the model's structured evaluation of a PR.

use serde::{Deserialize, Serialize};

/// A single review comment on a specific line.
///
/// `line` is a new-file line number and should reference a line introduced
/// or retained by the diff (an addition or context line); the prompt
/// instructs the model accordingly, but this is not enforced here — the
/// position mapper treats out-of-diff lines as unmappable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// File path exactly as it appears in the diff.
    pub path: String,
    /// Line number in the new file (1-based).
    pub line: u32,
    /// Constructive comment text.
    pub body: String,
}

/// The model's evaluation of one PR: summary, three 0–10 sub-scores, and
/// line-specific comments.
///
/// Field names are the wire contract with the model and with API consumers;
/// transient — the caller decides storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrReview {
    /// Summary of the changes and overall assessment.
    pub summary: String,
    /// Creativity/innovation score, 0–10.
    pub creativity_score: u8,
    /// Efficiency/performance score, 0–10.
    pub efficiency_score: u8,
    /// Edge-case handling score, 0–10.
    pub edge_case_handling_score: u8,
    /// Line-specific comments to post on the PR diff.
    #[serde(default)]
    pub review_comments: Vec<ReviewComment>,
}

impl PrReview {
    /// Derived overall score: `round(mean(sub-scores) × 10, 1)`, in 0.0–100.0.
    pub fn overall_score(&self) -> f64 {
        let total = self.creativity_score as f64
            + self.efficiency_score as f64
            + self.edge_case_handling_score as f64;
        let scaled = total / 3.0 * 10.0;
        (scaled * 10.0).round() / 10.0
    }
}
