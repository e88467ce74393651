//! Conversation state: turns, history, and the per-message chat step that
//! channels call.

use serde::{Deserialize, Serialize};

use crate::router::ResponseRouter;

/// One exchange. `assistant` is `None` while a reply is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Option<String>)", into = "(String, Option<String>)")]
pub struct Turn {
    pub user: String,
    pub assistant: Option<String>,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: Option<String>) -> Self {
        Self { user: user.into(), assistant }
    }
}

// Serialised as a `[user, assistant]` pair, the shape chat transcripts use.
impl From<(String, Option<String>)> for Turn {
    fn from((user, assistant): (String, Option<String>)) -> Self {
        Self { user, assistant }
    }
}

impl From<Turn> for (String, Option<String>) {
    fn from(turn: Turn) -> Self {
        (turn.user, turn.assistant)
    }
}

/// Chronological turns, oldest first.
pub type History = Vec<Turn>;

/// Route `message` and append the exchange to `history`.
///
/// Whitespace-only input is ignored: `history` is left untouched and `None`
/// is returned. Otherwise the reply is returned and recorded as a new turn.
pub async fn chat_turn(
    router: &ResponseRouter,
    message: &str,
    history: &mut History,
    max_tokens: Option<u32>,
) -> Option<String> {
    if message.trim().is_empty() {
        return None;
    }
    let reply = router.respond_with(message, history, max_tokens).await;
    history.push(Turn::new(message, Some(reply.clone())));
    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::llm::LlmProvider;

    fn router() -> ResponseRouter {
        ResponseRouter::builder(LlmProvider::Disabled)
            .settings(RouterConfig { seed: Some(1), ..RouterConfig::default() })
            .build()
    }

    #[tokio::test]
    async fn empty_input_leaves_history_unchanged() {
        let router = router();
        let mut history = vec![Turn::new("hi", Some("Enthuva myre?".into()))];
        let before = history.clone();
        assert_eq!(chat_turn(&router, "", &mut history, None).await, None);
        assert_eq!(chat_turn(&router, "   \n\t", &mut history, None).await, None);
        assert_eq!(history, before);
    }

    #[tokio::test]
    async fn reply_is_appended_as_turn() {
        let router = router();
        let mut history = History::new();
        let reply = chat_turn(&router, "5 + 3", &mut history, None).await.unwrap();
        assert!(reply.contains('8'));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user, "5 + 3");
        assert_eq!(history[0].assistant.as_deref(), Some(reply.as_str()));
    }

    #[test]
    fn turn_serializes_as_pair() {
        let turn = Turn::new("q", Some("a".into()));
        assert_eq!(serde_json::to_string(&turn).unwrap(), r#"["q","a"]"#);
        let back: Turn = serde_json::from_str(r#"["q",null]"#).unwrap();
        assert_eq!(back, Turn::new("q", None));
    }
}
