//! Dummy LLM provider: echoes the latest user message prefixed with `[echo]`.
//! Used to exercise the whole router without a model endpoint.

use crate::llm::{ChatMessage, LlmResponse, ProviderError, Role};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<LlmResponse, ProviderError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(LlmResponse { text: format!("[echo] {last_user}") })
    }
}
