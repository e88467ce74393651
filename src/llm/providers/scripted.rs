//! Scripted provider: replays a fixed queue of replies and failures and
//! records every prompt it receives. Lets router tests drive stage 2
//! deterministically.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::llm::{ChatMessage, GenerationParams, LlmResponse, ProviderError};

/// One scripted outcome: `Ok(text)` or `Err(reason)`.
pub type ScriptStep = Result<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    steps: Arc<Mutex<VecDeque<ScriptStep>>>,
    calls: Arc<Mutex<Vec<(Vec<ChatMessage>, GenerationParams)>>>,
}

impl ScriptedProvider {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into_iter().collect())),
            calls: Arc::default(),
        }
    }

    /// Shorthand for a provider that always answers with the same text.
    pub fn replying(text: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(text.to_string())))
    }

    pub fn complete(
        &self,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<LlmResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((messages.to_vec(), params));

        let step = self.steps.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match step {
            Some(Ok(text)) => Ok(LlmResponse { text }),
            Some(Err(reason)) => Err(ProviderError::Request(reason)),
            None => Err(ProviderError::Exhausted),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn calls(&self) -> Vec<(Vec<ChatMessage>, GenerationParams)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_exhausts() {
        let p = ScriptedProvider::new([Ok("one".to_string()), Err("boom".to_string())]);
        let msgs = [ChatMessage::user("q")];
        assert_eq!(p.complete(&msgs, GenerationParams::default()).unwrap().text, "one");
        assert!(matches!(
            p.complete(&msgs, GenerationParams::default()),
            Err(ProviderError::Request(r)) if r == "boom"
        ));
        assert!(matches!(
            p.complete(&msgs, GenerationParams::default()),
            Err(ProviderError::Exhausted)
        ));
        assert_eq!(p.calls().len(), 3);
    }

    #[test]
    fn clones_share_the_script() {
        let p = ScriptedProvider::replying("same", 1);
        let q = p.clone();
        let msgs = [ChatMessage::user("q")];
        assert!(q.complete(&msgs, GenerationParams::default()).is_ok());
        assert!(p.complete(&msgs, GenerationParams::default()).is_err());
        assert_eq!(p.calls().len(), 2);
    }
}
