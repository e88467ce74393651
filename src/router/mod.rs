//! Response routing: decides, per message, where the reply comes from.
//!
//! Three stages, first one that produces a reply wins:
//!
//! 1. **Fact**: identity questions and the literal fact rules in [`facts`].
//! 2. **Model**: the injected [`LlmProvider`] with the persona prompt and
//!    recent history. Replies go through [`quality`]; a provider error or a
//!    rejected reply demotes to stage 3.
//! 3. **Fallback**: a clarification for questions, otherwise a canned phrase
//!    for the message's category, see [`fallback`].
//!
//! The router never fails outward. All randomness flows through one seeded
//! [`StdRng`] so tests can pin it.

pub mod facts;
pub mod fallback;
pub mod quality;
pub mod query;

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

use self::facts::FactBook;
use self::quality::{QualityGate, Rejection};
use self::query::Query;
use crate::chat::Turn;
use crate::config::{FactsConfig, RouterConfig};
use crate::llm::{GenerationParams, LlmProvider, ProviderError};
use crate::persona::{self, Category, PersonalityProfile};

/// Which stage produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fact,
    Model,
    Fallback,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Fact => "fact",
            Stage::Model => "model",
            Stage::Fallback => "fallback",
        })
    }
}

/// A reply plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub text: String,
    pub stage: Stage,
    /// Fact rule name, `"model"`, `"clarify"`, or a category name.
    pub rule: &'static str,
    /// Entity a fact rule answered about.
    pub entity: Option<String>,
}

impl Routed {
    fn fallback(rule: &'static str, text: String) -> Self {
        Self { text, stage: Stage::Fallback, rule, entity: None }
    }
}

/// Why stage 2 did not produce a reply.
#[derive(Debug, Error)]
enum Demotion {
    #[error("model call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("model reply rejected: {0}")]
    Rejected(#[from] Rejection),
}

pub struct ResponseRouter {
    provider: LlmProvider,
    profile: PersonalityProfile,
    facts: FactBook,
    settings: RouterConfig,
    quality: QualityGate,
    system_prompt: String,
    rng: Mutex<StdRng>,
}

pub struct RouterBuilder {
    provider: LlmProvider,
    profile: PersonalityProfile,
    facts: FactsConfig,
    settings: RouterConfig,
    system_prompt: Option<String>,
}

impl RouterBuilder {
    pub fn settings(mut self, settings: RouterConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn profile(mut self, profile: PersonalityProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Office-holder overrides.
    pub fn facts(mut self, facts: FactsConfig) -> Self {
        self.facts = facts;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn build(self) -> ResponseRouter {
        let rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let system_prompt = self
            .system_prompt
            .unwrap_or_else(|| persona::DEFAULT_PERSONA_PROMPT.replace("{{name}}", persona::DISPLAY_NAME));
        info!(
            provider = self.provider.name(),
            history_turns = self.settings.history_turns,
            seeded = self.settings.seed.is_some(),
            "response router ready"
        );
        ResponseRouter {
            quality: QualityGate::new(&self.settings),
            facts: FactBook::new(&self.facts),
            provider: self.provider,
            profile: self.profile,
            settings: self.settings,
            system_prompt,
            rng: Mutex::new(rng),
        }
    }
}

impl ResponseRouter {
    /// Start building a router around `provider`.
    pub fn builder(provider: LlmProvider) -> RouterBuilder {
        RouterBuilder {
            provider,
            profile: PersonalityProfile::default(),
            facts: FactsConfig::default(),
            settings: RouterConfig::default(),
            system_prompt: None,
        }
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    pub fn profile(&self) -> &PersonalityProfile {
        &self.profile
    }

    /// Reply to `message` given prior `history`. Always non-empty.
    pub async fn respond(&self, message: &str, history: &[Turn]) -> String {
        self.respond_with(message, history, None).await
    }

    /// [`respond`](Self::respond) with a per-request generation cap.
    pub async fn respond_with(&self, message: &str, history: &[Turn], max_tokens: Option<u32>) -> String {
        self.route(message, history, max_tokens).await.text
    }

    /// Run the cascade and report which stage answered.
    pub async fn route(&self, message: &str, history: &[Turn], max_tokens: Option<u32>) -> Routed {
        let query = Query::new(message);
        let routed = match self.intercept(&query) {
            Some(routed) => routed,
            None => match self.generate(&query, history, max_tokens).await {
                Ok(text) => Routed { text, stage: Stage::Model, rule: "model", entity: None },
                Err(reason) => {
                    debug!(%reason, "demoted to fallback");
                    self.fallback(&query)
                }
            },
        };
        debug!(
            stage = %routed.stage,
            rule = routed.rule,
            entity = routed.entity.as_deref().unwrap_or("-"),
            "routed"
        );
        routed
    }

    /// Stage 1. Identity goes first: it must win over both the fact rules
    /// and the model.
    fn intercept(&self, query: &Query) -> Option<Routed> {
        if query.is_empty() {
            return None;
        }
        let mut rng = self.rng();
        if fallback::classify(&self.profile, query) == Category::Identity {
            let text = fallback::category_phrase(
                &self.profile,
                Category::Identity,
                self.settings.interjection_probability,
                &mut rng,
            );
            return Some(Routed { text, stage: Stage::Fact, rule: "identity", entity: None });
        }
        self.facts.intercept(query, &mut rng).map(|answer| Routed {
            text: answer.text,
            stage: Stage::Fact,
            rule: answer.rule,
            entity: answer.entity,
        })
    }

    /// Stage 2.
    async fn generate(&self, query: &Query<'_>, history: &[Turn], max_tokens: Option<u32>) -> Result<String, Demotion> {
        if query.is_empty() {
            return Err(Rejection::Empty.into());
        }
        let messages = persona::prompt::model_messages(
            &self.system_prompt,
            history,
            self.settings.history_turns,
            query.raw(),
        );
        let response = self.provider.complete(&messages, GenerationParams { max_tokens }).await?;
        let reply = quality::clean(&response.text);
        self.quality.check(&reply)?;
        Ok(quality::ensure_marker(reply, &mut self.rng()))
    }

    /// Stage 3.
    fn fallback(&self, query: &Query) -> Routed {
        let mut rng = self.rng();
        let category = fallback::classify(&self.profile, query);
        if category != Category::Identity && query.is_question() {
            return Routed::fallback("clarify", fallback::clarify(query, &mut rng));
        }
        let text = fallback::category_phrase(
            &self.profile,
            category,
            self.settings.interjection_probability,
            &mut rng,
        );
        Routed::fallback(category.as_str(), text)
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Replace each `{key}` in `template` with its value.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter()
        .fold(template.to_string(), |out, (key, value)| out.replace(&format!("{{{key}}}"), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::scripted::ScriptedProvider;

    fn router(provider: LlmProvider) -> ResponseRouter {
        ResponseRouter::builder(provider)
            .settings(RouterConfig { seed: Some(42), ..RouterConfig::default() })
            .build()
    }

    #[test]
    fn fill_replaces_every_key() {
        assert_eq!(fill("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]), "x and y and x");
        assert_eq!(fill("no keys", &[("a", "x")]), "no keys");
    }

    #[tokio::test]
    async fn facts_skip_the_model() {
        let scripted = ScriptedProvider::replying("Model reply here, myre.", 5);
        let r = router(LlmProvider::Scripted(scripted.clone()));
        let routed = r.route("What is the capital of France?", &[], None).await;
        assert_eq!(routed.stage, Stage::Fact);
        assert!(routed.text.contains("Paris"));
        assert!(scripted.calls().is_empty());
    }

    #[tokio::test]
    async fn identity_wins_over_model() {
        let scripted = ScriptedProvider::replying("Njan oru AI aanu, myre.", 1);
        let r = router(LlmProvider::Scripted(scripted.clone()));
        let routed = r.route("Who are you?", &[], None).await;
        assert_eq!(routed.rule, "identity");
        assert!(routed.text.contains(persona::IDENTITY_PHRASE));
        assert!(scripted.calls().is_empty());
    }

    #[tokio::test]
    async fn accepted_model_reply_is_used() {
        let scripted = ScriptedProvider::replying("Thani Thankan: Rust padikk, athaanu nallathu.<end_of_turn>", 1);
        let r = router(LlmProvider::Scripted(scripted.clone()));
        let routed = r.route("tell me something", &[], Some(64)).await;
        assert_eq!(routed.stage, Stage::Model);
        assert!(routed.text.starts_with("Rust padikk, athaanu nallathu."));
        assert!(quality::has_marker(&routed.text));

        let calls = scripted.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.max_tokens, Some(64));
        assert_eq!(calls[0].0.last().map(|m| m.content.as_str()), Some("tell me something"));
    }

    #[tokio::test]
    async fn rejected_reply_demotes_to_fallback() {
        let scripted = ScriptedProvider::new(vec![Ok("ok".into()), Ok("I'm sorry, I cannot help with that.".into())]);
        let r = router(LlmProvider::Scripted(scripted));
        let first = r.route("hello", &[], None).await;
        assert_eq!((first.stage, first.rule), (Stage::Fallback, "greeting"));
        let second = r.route("asdkjasdlk", &[], None).await;
        assert_eq!((second.stage, second.rule), (Stage::Fallback, "default"));
    }

    #[tokio::test]
    async fn provider_error_demotes_questions_to_clarify() {
        let r = router(LlmProvider::Disabled);
        let routed = r.route("Why is the sky purple?", &[], None).await;
        assert_eq!(routed.rule, "clarify");
        assert!(routed.text.contains("Why is the sky purple?"));
    }

    #[tokio::test]
    async fn requests_without_a_wh_word_keep_their_category() {
        let r = router(LlmProvider::Disabled);
        let routed = r.route("can you help me with python", &[], None).await;
        assert_eq!((routed.stage, routed.rule), (Stage::Fallback, "help"));
    }

    #[tokio::test]
    async fn empty_message_gets_a_default_phrase() {
        let scripted = ScriptedProvider::replying("should not be called", 1);
        let r = router(LlmProvider::Scripted(scripted.clone()));
        let routed = r.route("   ", &[], None).await;
        assert_eq!((routed.stage, routed.rule), (Stage::Fallback, "default"));
        assert!(!routed.text.is_empty());
        assert!(scripted.calls().is_empty());
    }
}
