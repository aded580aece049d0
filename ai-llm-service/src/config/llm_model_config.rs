use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// It can be extended as needed to support new backends or features.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"claude-3-haiku-20240307"`).
    pub model: String,

    /// Inference endpoint (remote API base URL).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (lower = more consistent scoring).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
