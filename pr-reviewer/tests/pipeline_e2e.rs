//! End-to-end pipeline test against mocked host + model endpoints.
//!
//! One wiremock server plays both roles: the code-host REST API (files,
//! PR meta, review creation) and the model's `/v1/messages` endpoint.

use std::sync::Once;

use pr_reviewer::evaluate_and_review;
use pr_reviewer::errors::{Error, EvaluationError};
use pr_reviewer::git_providers::ProviderConfig;

use ai_llm_service::{LlmModelConfig, LlmProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static SNAPSHOT_DIR: Once = Once::new();

/// Points the snapshot store at a throwaway directory, once per process.
fn isolate_snapshot_dir() {
    SNAPSHOT_DIR.call_once(|| {
        let dir = tempfile::tempdir().expect("tempdir");
        // Leak the tempdir so the path stays valid for the whole test run.
        let path = dir.keep();
        unsafe { std::env::set_var("PR_REVIEWER_SNAPSHOT_DIR", &path) };
    });
}

fn provider_cfg(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        base_api: server.uri(),
        token: "test-token".into(),
    }
}

fn llm_cfg(server: &MockServer) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model: "claude-3-haiku-20240307".into(),
        endpoint: server.uri(),
        api_key: Some("test-key".into()),
        max_tokens: Some(1024),
        temperature: Some(0.3),
        top_p: None,
        timeout_secs: Some(5),
    }
}

async fn mount_pr_files(server: &MockServer, files: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/42/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(files))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_run_posts_review_and_returns_scores() {
    isolate_snapshot_dir();
    let server = MockServer::start().await;

    mount_pr_files(
        &server,
        serde_json::json!([{
            "filename": "src/main.rs",
            "status": "modified",
            "patch": "@@ -1,2 +1,3 @@\n fn main() {\n+    let unused = 42;\n }"
        }]),
    )
    .await;

    let model_review = serde_json::json!({
        "summary": "Introduces an unused binding; otherwise a small, clean change.",
        "creativity_score": 4,
        "efficiency_score": 6,
        "edge_case_handling_score": 5,
        "review_comments": [
            {"path": "src/main.rs", "line": 2, "body": "This binding is never used."}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": model_review.to_string()}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "head": {"sha": "deadbeef"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls/42/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "html_url": "https://github.com/acme/widgets/pull/42#pullrequestreview-7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = evaluate_and_review(
        provider_cfg(&server),
        llm_cfg(&server),
        "https://github.com/acme/widgets/pull/42",
    )
    .await
    .unwrap();

    assert!(outcome.review.creativity_score <= 10);
    assert!(outcome.review.efficiency_score <= 10);
    assert!(outcome.review.edge_case_handling_score <= 10);
    let overall = outcome.review.overall_score();
    assert!((0.0..=100.0).contains(&overall));
    assert_eq!(outcome.total_comments, 1);
    assert!(outcome.posted_comments);
    assert!(outcome.review_url.unwrap().contains("pullrequestreview"));
}

#[tokio::test]
async fn empty_diff_fails_before_the_model_is_called() {
    isolate_snapshot_dir();
    let server = MockServer::start().await;

    mount_pr_files(&server, serde_json::json!([])).await;
    // No /v1/messages mock: a model call would surface as a transport error,
    // not as NoFilesToEvaluate.

    let err = evaluate_and_review(
        provider_cfg(&server),
        llm_cfg(&server),
        "https://github.com/acme/widgets/pull/42",
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Evaluation(EvaluationError::NoFilesToEvaluate)
    ));
}

#[tokio::test]
async fn bad_pr_url_fails_without_any_request() {
    isolate_snapshot_dir();
    let server = MockServer::start().await;
    // No mocks mounted at all; the parser must reject before any I/O.

    let err = evaluate_and_review(
        provider_cfg(&server),
        llm_cfg(&server),
        "https://github.com/acme/widgets/issues/42",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Reference(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn publish_failure_still_returns_the_review() {
    isolate_snapshot_dir();
    let server = MockServer::start().await;

    mount_pr_files(
        &server,
        serde_json::json!([{
            "filename": "src/main.rs",
            "status": "modified",
            "patch": "@@ -1,1 +1,2 @@\n fn main() {}\n+// trailing note"
        }]),
    )
    .await;

    let model_review = serde_json::json!({
        "summary": "Adds a comment line.",
        "creativity_score": 2,
        "efficiency_score": 5,
        "edge_case_handling_score": 3,
        "review_comments": [
            {"path": "src/main.rs", "line": 2, "body": "Drop the stray comment."}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": model_review.to_string()}]
        })))
        .mount(&server)
        .await;

    // Head-commit lookup fails: publishing cannot proceed, but the scores
    // must still come back.
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("host hiccup"))
        .mount(&server)
        .await;

    let outcome = evaluate_and_review(
        provider_cfg(&server),
        llm_cfg(&server),
        "https://github.com/acme/widgets/pull/42",
    )
    .await
    .unwrap();

    assert_eq!(outcome.review.efficiency_score, 5);
    assert!(!outcome.posted_comments);
    assert!(outcome.review_url.is_none());
    assert_eq!(outcome.total_comments, 1);
}
