use ai_llm_service::{LlmModelConfig, config_anthropic};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// API base for the code host, e.g. "https://api.github.com".
    pub github_api_base: String,
    /// Token for the code-host API (PAT or app token).
    pub github_token: String,
    /// Configuration for the evaluation model.
    pub llm_config: LlmModelConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Self {
        Self {
            github_api_base: std::env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| "https://api.github.com".into()),
            github_token: std::env::var("GITHUB_TOKEN").expect("GITHUB_TOKEN is required"),

            llm_config: config_anthropic().expect("valid Anthropic model configuration"),
        }
    }
}
