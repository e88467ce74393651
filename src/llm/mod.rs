//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities; clone them freely.
//! The router receives one at construction time and never reaches for a
//! global model handle.

pub mod providers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("model disabled")]
    Disabled,
    #[cfg(any(test, feature = "test-util"))]
    #[error("scripted provider exhausted")]
    Exhausted,
}

// ── Wire-neutral message types ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Per-call generation knobs. `None` leaves the provider default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: Option<u32>,
}

/// Text produced by a provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Disabled,
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
    /// Canned replies for tests; needs the `test-util` feature outside unit tests.
    #[cfg(any(test, feature = "test-util"))]
    Scripted(providers::scripted::ScriptedProvider),
}

impl LlmProvider {
    /// Send the role-tagged `messages` and return the model's continuation.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<LlmResponse, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(messages).await,
            LlmProvider::Disabled => Err(ProviderError::Disabled),
            LlmProvider::OpenAiCompatible(p) => p.complete(messages, params).await,
            #[cfg(any(test, feature = "test-util"))]
            LlmProvider::Scripted(p) => p.complete(messages, params),
        }
    }

    /// Short name for logs and the health endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            LlmProvider::Disabled => "disabled",
            LlmProvider::OpenAiCompatible(_) => "openai-compatible",
            #[cfg(any(test, feature = "test-util"))]
            LlmProvider::Scripted(_) => "scripted",
        }
    }

    /// Reachability probe. Only the HTTP backend can be unreachable.
    pub async fn ping(&self) -> Result<(), ProviderError> {
        match self {
            LlmProvider::OpenAiCompatible(p) => p.ping().await,
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_always_fails() {
        let p = LlmProvider::Disabled;
        let err = p.complete(&[ChatMessage::user("hi")], GenerationParams::default()).await;
        assert!(matches!(err, Err(ProviderError::Disabled)));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::system("x")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"x"}"#);
    }
}
