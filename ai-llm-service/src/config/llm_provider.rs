/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// The evaluation pipeline currently talks to Anthropic's Messages API only.
/// Adding more providers in the future (e.g., OpenAI, a local runtime) is done
/// by extending this enum and adding a matching service implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Anthropic Messages API (Claude models).
    Anthropic,
}
