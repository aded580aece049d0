//! Shared LLM service crate.
//!
//! Provides:
//! - provider/model configuration structs loaded strictly from environment,
//! - a unified error hierarchy for config and provider failures,
//! - a thin, non-streaming Anthropic Messages API client.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::default_config::config_anthropic;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, Result};
pub use services::anthropic_service::AnthropicService;
