//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Provider-aware mapping (401→Unauthorized, 404→NotFound, other non-2xx
//!   surfaced with the host's status and body).
//! - No dynamic dispatch, no async-trait, ergonomic `?` via `From` impls.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type PrResult<T> = Result<T, Error>;

/// Root error type for the pr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// PR URL parsing failure (caller input error, never retryable).
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Code-host (GitHub) related failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Snapshot persistence (file I/O / JSON) failure.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Evaluation failures (empty input, malformed model output).
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// LLM transport/protocol failure.
    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),
}

/// Errors from parsing a PR URL into a reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// The URL does not match `https://<host>/<owner>/<repo>/pull/<number>`.
    #[error("invalid PR URL format: {0} (expected https://github.com/owner/repo/pull/number)")]
    InvalidFormat(String),
}

/// Detailed provider-specific error used inside the code-host layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// PR (or endpoint) absent (HTTP 404).
    #[error("PR not found")]
    NotFound,

    /// Bad or missing credentials (HTTP 401).
    #[error("invalid code-host token")]
    Unauthorized,

    /// Any other non-2xx status, carrying the host's status and body.
    #[error("code-host API error: status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The host refused a positional review batch (HTTP 422).
    ///
    /// Recovered locally by the publisher via the general-comment fallback;
    /// callers outside the publish path should treat it as `Upstream`.
    #[error("review rejected by code host: {body}")]
    Unprocessable { body: String },

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error on a host response.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Snapshot store errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Evaluation-stage errors (prompt building and model-output validation).
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The PR carried no files to evaluate; evaluation is skipped.
    #[error("no files to evaluate in the PR")]
    NoFilesToEvaluate,

    /// The model output could not be parsed as JSON, even after extracting
    /// the largest `{...}` span. Carries the raw text for diagnostics.
    #[error("failed to parse model response as JSON: {raw}")]
    UnparsableModelOutput { raw: String },

    /// The parsed output violates the review schema (score range, comment shape).
    #[error("model response violates review schema: {field}: {detail}")]
    SchemaViolation { field: &'static str, detail: String },
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Snapshot(SnapshotError::Io(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        // Status-carrying failures are built explicitly at call sites so the
        // response body can be captured; anything reaching here is transport.
        ProviderError::Network(e.to_string())
    }
}
