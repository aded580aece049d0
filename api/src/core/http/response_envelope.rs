use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use pr_reviewer::errors::{Error, EvaluationError, ProviderError};

/// Universal response envelope for both success and error (simplified).
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "INVALID_PR_URL").
    pub code: &'static str,
    /// Human-friendly error message.
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Build a success envelope.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Build an error envelope.
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Convert to axum Response.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl ApiResponse<()> {
    /// Map a pipeline error onto an error envelope with a matching status.
    ///
    /// Caller-input problems come back as 4xx, host failures pass their
    /// meaning through, and everything else is a gateway-style 5xx.
    pub fn from_pipeline_error(err: &Error) -> Response {
        let (status, code) = match err {
            Error::Reference(_) => (StatusCode::BAD_REQUEST, "INVALID_PR_URL"),
            Error::Provider(ProviderError::NotFound) => (StatusCode::NOT_FOUND, "PR_NOT_FOUND"),
            Error::Provider(ProviderError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "BAD_HOST_TOKEN")
            }
            Error::Provider(_) => (StatusCode::BAD_GATEWAY, "HOST_ERROR"),
            Error::Evaluation(EvaluationError::NoFilesToEvaluate) => {
                (StatusCode::BAD_REQUEST, "NO_FILES_TO_EVALUATE")
            }
            Error::Evaluation(_) => (StatusCode::BAD_GATEWAY, "MODEL_OUTPUT_INVALID"),
            Error::Snapshot(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SNAPSHOT_STORE_FAILED"),
            Error::Llm(_) => (StatusCode::BAD_GATEWAY, "MODEL_UNAVAILABLE"),
        };

        ApiResponse::<()>::error(code, err.to_string()).into_response_with_status(status)
    }
}
