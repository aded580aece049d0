//! Code-host I/O.
//!
//! A single concrete GitHub client over plain `async fn` — no async-trait,
//! no boxed trait objects. The REST endpoint shapes live in `github.rs`;
//! everything downstream consumes the normalized types in `types.rs`, so a
//! different code host would slot in behind the same surface.

pub mod types;
pub use types::*;

pub mod github;
pub use github::GitHubClient;

/// Runtime configuration for the code-host client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com"
    pub base_api: String,
    /// Access token (PAT or app token).
    pub token: String,
}
