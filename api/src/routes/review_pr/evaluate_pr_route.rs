use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use pr_reviewer::{evaluate_and_review, git_providers::ProviderConfig};
use tracing::{info, instrument};

use crate::{
    core::{
        app_state::AppState,
        http::response_envelope::ApiResponse,
    },
    routes::review_pr::{
        evaluate_pr_request::EvaluatePrRequest, evaluate_pr_response::EvaluatePrResponse,
    },
};

/// HTTP endpoint for evaluating a PR and posting review comments.
///
/// Expects a JSON payload with `pr_url`. Runs the full pipeline: fetch the
/// diff, score it with the model, and post line comments back on the PR
/// (degrading to a single aggregated comment when the host rejects the
/// batch). The review scores are returned even when posting fails.
#[instrument(name = "evaluate_pr_route", skip(state, body))]
pub async fn evaluate_pr_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EvaluatePrRequest>,
) -> Response {
    let cfg = ProviderConfig {
        base_api: state.github_api_base.clone(),
        token: state.github_token.clone(),
    };

    info!(pr_url = %body.pr_url, "starting PR evaluation");

    let result = evaluate_and_review(cfg, state.llm_config.clone(), &body.pr_url).await;

    match result {
        Ok(outcome) => {
            let overall_score = outcome.review.overall_score();
            ApiResponse::success(EvaluatePrResponse {
                review: outcome.review,
                overall_score,
                comments_posted: outcome.posted_comments,
                review_url: outcome.review_url,
                total_comments: outcome.total_comments,
            })
            .into_response_with_status(StatusCode::OK)
        }
        Err(err) => ApiResponse::from_pipeline_error(&err),
    }
}
