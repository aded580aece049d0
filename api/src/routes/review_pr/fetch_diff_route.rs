use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use pr_reviewer::{
    fetch_diff,
    git_providers::{GitHubClient, ProviderConfig},
    parse_pr_url,
};
use tracing::instrument;

use crate::{
    core::{
        app_state::AppState,
        http::response_envelope::ApiResponse,
    },
    routes::review_pr::evaluate_pr_request::EvaluatePrRequest,
};

/// HTTP endpoint for fetching (and persisting) the files changed in a PR,
/// without evaluating them.
#[instrument(name = "fetch_diff_route", skip(state, body))]
pub async fn fetch_diff_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EvaluatePrRequest>,
) -> Response {
    let cfg = ProviderConfig {
        base_api: state.github_api_base.clone(),
        token: state.github_token.clone(),
    };

    let result = async {
        let pr = parse_pr_url(&body.pr_url)?;
        let client = GitHubClient::from_config(cfg)?;
        fetch_diff(&client, &pr).await
    }
    .await;

    match result {
        Ok(snapshot) => {
            ApiResponse::success(snapshot).into_response_with_status(StatusCode::OK)
        }
        Err(err) => ApiResponse::from_pipeline_error(&err),
    }
}
