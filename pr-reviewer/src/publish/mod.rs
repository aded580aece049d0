//! Publisher: post the model's comments back onto the PR.
//!
//! All line comments go out as one review batch addressed by
//! `line` + `side=RIGHT`. Before submitting, each comment's diff position is
//! resolved against the snapshot's patches — unmappable comments are still
//! submitted (line/side addressing tolerates them) but logged, since they
//! are the ones a 422 usually points at. When the host rejects the batch
//! with 422, the publisher degrades to a single aggregated, non-positional
//! comment; 404/401 and other host errors propagate as hard failures with no
//! silent fallback.

use tracing::{debug, info, warn};

use crate::errors::{Error, PrResult, ProviderError};
use crate::git_providers::github::{GitHubClient, InlineComment};
use crate::git_providers::types::{DiffSnapshot, PrReference};
use crate::position::map_line_to_position;
use crate::review::types::ReviewComment;

/// Title line attached to the review (and to the fallback comment).
const REVIEW_TITLE: &str = "AI Code Review";

/// Outcome of a publish attempt.
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Whether any comment (inline batch or fallback) was posted.
    pub posted: bool,
    /// URL of the created review or fallback comment, when the host returned one.
    pub review_url: Option<String>,
}

/// Publishes `comments` onto the PR as one review.
///
/// No-op success when `comments` is empty. The `snapshot` must be the one the
/// comments were produced from: its patches are what positions are resolved
/// against.
pub async fn publish_review(
    client: &GitHubClient,
    pr: &PrReference,
    comments: &[ReviewComment],
    snapshot: &DiffSnapshot,
) -> PrResult<PublishResult> {
    if comments.is_empty() {
        debug!("publish: no comments to post for {pr}");
        return Ok(PublishResult {
            posted: false,
            review_url: None,
        });
    }

    let head_sha = client.get_head_sha(pr).await?;
    debug!("publish: head_sha={head_sha}");

    let mut inline = Vec::with_capacity(comments.len());
    for c in comments {
        match snapshot.patch_for(&c.path) {
            Some(patch) => match map_line_to_position(patch, c.line) {
                Some(pos) => debug!("publish: {}:{} maps to position {}", c.path, c.line, pos),
                None => warn!(
                    "publish: {}:{} is not mappable within the diff; submitting by line/side",
                    c.path, c.line
                ),
            },
            None => warn!(
                "publish: {} is not part of the snapshot; submitting by line/side",
                c.path
            ),
        }
        inline.push(InlineComment {
            path: &c.path,
            line: c.line,
            side: "RIGHT",
            body: &c.body,
        });
    }

    match client
        .create_review(pr, &head_sha, REVIEW_TITLE, &inline)
        .await
    {
        Ok(created) => {
            info!("publish: posted {} inline comments on {pr}", inline.len());
            Ok(PublishResult {
                posted: true,
                review_url: created.html_url,
            })
        }
        Err(Error::Provider(ProviderError::Unprocessable { body })) => {
            warn!("publish: host rejected inline batch for {pr}: {body}");
            let fallback = render_fallback_comment(comments);
            let created = client.create_issue_comment(pr, &fallback).await?;
            info!("publish: posted aggregated fallback comment on {pr}");
            Ok(PublishResult {
                posted: true,
                review_url: created.html_url,
            })
        }
        Err(other) => Err(other),
    }
}

/// Renders every original comment into one aggregated plain-text comment
/// ("path:Lline — body").
fn render_fallback_comment(comments: &[ReviewComment]) -> String {
    let mut s = format!("## {REVIEW_TITLE}\n\n");
    for c in comments {
        s.push_str(&format!("**{}:L{}**\n{}\n\n", c.path, c.line, c.body));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git_providers::types::{ChangeStatus, FileDiff};
    use crate::git_providers::ProviderConfig;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pr() -> PrReference {
        PrReference {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: 42,
        }
    }

    fn snapshot() -> DiffSnapshot {
        DiffSnapshot::new(
            pr(),
            vec![FileDiff {
                filename: "src/lib.rs".into(),
                status: ChangeStatus::Modified,
                patch: "@@ -1,2 +1,3 @@\n context\n+added line\n context".into(),
            }],
        )
    }

    fn comment(line: u32) -> ReviewComment {
        ReviewComment {
            path: "src/lib.rs".into(),
            line,
            body: "Consider a descriptive name.".into(),
        }
    }

    fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::from_config(ProviderConfig {
            base_api: server.uri(),
            token: "test-token".into(),
        })
        .unwrap()
    }

    async fn mount_head_sha(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/pulls/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "head": {"sha": "abc123"}
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn empty_comments_are_a_no_op() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would fail the test via Network error.
        let result = publish_review(&client_for(&server), &pr(), &[], &snapshot())
            .await
            .unwrap();
        assert!(!result.posted);
        assert!(result.review_url.is_none());
    }

    #[tokio::test]
    async fn posts_single_review_batch() {
        let server = MockServer::start().await;
        mount_head_sha(&server).await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/pulls/42/reviews"))
            .and(body_string_contains("\"commit_id\":\"abc123\""))
            .and(body_string_contains("\"side\":\"RIGHT\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "html_url": "https://github.com/acme/widgets/pull/42#pullrequestreview-9"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = publish_review(&client_for(&server), &pr(), &[comment(2)], &snapshot())
            .await
            .unwrap();
        assert!(result.posted);
        assert!(result.review_url.unwrap().contains("pullrequestreview"));
    }

    #[tokio::test]
    async fn rejected_batch_falls_back_to_one_general_comment() {
        let server = MockServer::start().await;
        mount_head_sha(&server).await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/pulls/42/reviews"))
            .respond_with(ResponseTemplate::new(422).set_body_string("line not in diff"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/issues/42/comments"))
            .and(body_string_contains("src/lib.rs:L2"))
            .and(body_string_contains("src/lib.rs:L900"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "html_url": "https://github.com/acme/widgets/pull/42#issuecomment-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let comments = [comment(2), comment(900)];
        let result = publish_review(&client_for(&server), &pr(), &comments, &snapshot())
            .await
            .unwrap();
        assert!(result.posted);
        assert!(result.review_url.unwrap().contains("issuecomment"));
    }

    #[tokio::test]
    async fn missing_pr_propagates_as_hard_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/pulls/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = publish_review(&client_for(&server), &pr(), &[comment(2)], &snapshot())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::NotFound)));
    }

    #[test]
    fn fallback_comment_lists_every_original_comment() {
        let comments = [comment(2), comment(7)];
        let text = render_fallback_comment(&comments);
        assert!(text.contains("src/lib.rs:L2"));
        assert!(text.contains("src/lib.rs:L7"));
        assert!(text.starts_with("## AI Code Review"));
    }
}
