//! Persona prompt assembly and the role-tagged model prompt.
//!
//! The system persona is built from plain-text template layers under the
//! configured prompts directory. Missing layers are skipped; when nothing
//! loads, [`DEFAULT_PERSONA_PROMPT`](super::DEFAULT_PERSONA_PROMPT) is used.
//! `{{key}}` substitution runs once at [`build()`](PromptBuilder::build).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chat::Turn;
use crate::llm::ChatMessage;

use super::{DEFAULT_PERSONA_PROMPT, DISPLAY_NAME};

const SEPARATOR: &str = "\n\n";

/// Fluent builder that assembles a layered prompt from template files.
pub struct PromptBuilder {
    prompts_dir: PathBuf,
    parts: Vec<String>,
    vars: HashMap<String, String>,
}

impl PromptBuilder {
    /// Create a builder rooted at `prompts_dir` (e.g. `"config/prompts"`).
    pub fn new(prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
            parts: Vec::new(),
            vars: HashMap::new(),
        }
    }

    /// Append a layer by loading `filename` from the prompts directory.
    /// Silently skips the layer when the file does not exist.
    pub fn layer(mut self, filename: &str) -> Self {
        let path = self.prompts_dir.join(filename);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let trimmed = text.trim().to_string();
                if !trimmed.is_empty() {
                    self.parts.push(trimmed);
                }
            }
            Err(_) => {
                tracing::debug!("prompt: layer '{}' not found, skipped", path.display());
            }
        }
        self
    }

    /// Directly append a text fragment.
    pub fn append(mut self, text: impl Into<String>) -> Self {
        let s = text.into();
        let trimmed = s.trim().to_string();
        if !trimmed.is_empty() {
            self.parts.push(trimmed);
        }
        self
    }

    /// Append `text` only when no layer has loaded yet.
    pub fn or_append(self, text: impl Into<String>) -> Self {
        if self.parts.is_empty() { self.append(text) } else { self }
    }

    /// Register a single `{{key}}` → `value` substitution.
    pub fn var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// Join all layers with blank lines and apply variable substitution.
    pub fn build(self) -> String {
        let mut prompt = self.parts.join(SEPARATOR);
        for (k, v) in &self.vars {
            let placeholder = format!("{{{{{}}}}}", k);
            prompt = prompt.replace(&placeholder, v);
        }
        prompt
    }
}

/// Load the system persona from `prompts_dir/persona_file`, falling back to
/// the built-in prompt.
pub fn persona_prompt(prompts_dir: impl AsRef<Path>, persona_file: &str) -> String {
    PromptBuilder::new(prompts_dir.as_ref())
        .layer(persona_file)
        .or_append(DEFAULT_PERSONA_PROMPT)
        .var("name", DISPLAY_NAME)
        .build()
}

/// Role-tagged model prompt: system persona, the last `history_turns` turns
/// of `history`, then `message`. Empty sides of a turn are skipped.
pub fn model_messages(
    system: &str,
    history: &[Turn],
    history_turns: usize,
    message: &str,
) -> Vec<ChatMessage> {
    let recent = &history[history.len().saturating_sub(history_turns)..];

    let mut messages = Vec::with_capacity(2 + recent.len() * 2);
    messages.push(ChatMessage::system(system));
    for turn in recent {
        if !turn.user.trim().is_empty() {
            messages.push(ChatMessage::user(turn.user.as_str()));
        }
        if let Some(reply) = turn.assistant.as_deref().filter(|r| !r.trim().is_empty()) {
            messages.push(ChatMessage::assistant(reply));
        }
    }
    messages.push(ChatMessage::user(message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    fn prompts_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("config/prompts")
    }

    #[test]
    fn builder_skips_missing_file() {
        let result = PromptBuilder::new(prompts_dir())
            .layer("nonexistent_file_xyz.md")
            .append("hello")
            .build();
        assert_eq!(result, "hello");
    }

    #[test]
    fn builder_substitutes_variable() {
        let result = PromptBuilder::new(prompts_dir())
            .append("You are {{name}}.")
            .var("name", "Thani Thankan")
            .build();
        assert_eq!(result, "You are Thani Thankan.");
    }

    #[test]
    fn persona_file_loads_and_substitutes_name() {
        let prompt = persona_prompt(prompts_dir(), "persona.md");
        assert!(prompt.contains("Thani Thankan"));
        assert!(!prompt.contains("{{name}}"));
    }

    #[test]
    fn missing_persona_file_uses_builtin() {
        let prompt = persona_prompt("/nonexistent/prompts", "persona.md");
        assert!(prompt.starts_with("You are **Thani Thankan**"));
    }

    #[test]
    fn model_messages_keep_last_turns_only() {
        let history = vec![
            Turn::new("first", Some("r1".into())),
            Turn::new("second", Some("r2".into())),
            Turn::new("third", None),
        ];
        let msgs = model_messages("sys", &history, 2, "now");
        let roles: Vec<Role> = msgs.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User, Role::User]
        );
        assert_eq!(msgs[1].content, "second");
        assert_eq!(msgs[3].content, "third");
        assert_eq!(msgs.last().unwrap().content, "now");
    }

    #[test]
    fn model_messages_zero_turns() {
        let history = vec![Turn::new("old", Some("reply".into()))];
        let msgs = model_messages("sys", &history, 0, "now");
        assert_eq!(msgs.len(), 2);
    }
}
