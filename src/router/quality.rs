//! Acceptance checks for model replies.
//!
//! A reply is cleaned first (control tokens, speaker labels), then checked.
//! Accepted replies without a persona marker get one appended.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use super::query::Query;
use crate::config::RouterConfig;
use crate::persona::{DISPLAY_NAME, MARKER_SUFFIXES, PERSONA_MARKERS};

/// Chat-template tokens some checkpoints leak into their output.
const CONTROL_TOKENS: &[&str] = &[
    "<end_of_turn>",
    "<start_of_turn>",
    "<eos>",
    "<bos>",
    "</s>",
    "<|im_end|>",
    "<|im_start|>",
    "<|eot_id|>",
    "<|endoftext|>",
];

/// Meta labels the persona prompt forbids but models emit anyway.
const META_LABELS: &[&str] = &["(Raw Thani Thankan)", "(Thani Thankan)", "[Thani Thankan]"];

const REFUSAL_PREFIXES: &[&str] = &[
    "i'm sorry",
    "i am sorry",
    "i cannot",
    "i can't",
    "i can not",
    "as an ai",
    "as a language model",
    "i apologize",
    "i'm unable",
    "i am unable",
];

const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "is", "are", "was", "were", "and", "of", "to", "in", "that", "it", "you", "for", "with",
    "this", "be", "have", "has", "on", "at", "as", "but", "not", "your", "can", "will", "would",
    "there", "they", "what", "which",
];

/// Why a model reply was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("reply is empty")]
    Empty,
    #[error("reply too short: {chars} chars, need more than {min}")]
    TooShort { chars: usize, min: usize },
    #[error("reply too English: {count} stop-words, max {max}")]
    TooMuchEnglish { count: usize, max: usize },
    #[error("reply is a refusal")]
    Refusal,
}

/// Thresholds from `[router]`.
#[derive(Debug, Clone)]
pub struct QualityGate {
    min_chars: usize,
    require_non_english: bool,
    max_stopwords: usize,
}

impl QualityGate {
    pub fn new(settings: &RouterConfig) -> Self {
        Self {
            min_chars: settings.min_response_chars,
            require_non_english: settings.require_non_english,
            max_stopwords: settings.max_english_stopwords,
        }
    }

    /// Check an already-cleaned reply.
    pub fn check(&self, reply: &str) -> Result<(), Rejection> {
        if reply.is_empty() {
            return Err(Rejection::Empty);
        }
        let chars = reply.chars().count();
        if chars <= self.min_chars {
            return Err(Rejection::TooShort { chars, min: self.min_chars });
        }
        let lower = reply.to_lowercase();
        if REFUSAL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            return Err(Rejection::Refusal);
        }
        if self.require_non_english {
            let count = english_stopwords(reply);
            if count > self.max_stopwords {
                return Err(Rejection::TooMuchEnglish { count, max: self.max_stopwords });
            }
        }
        Ok(())
    }
}

/// Strip control tokens, meta labels and a leading speaker label.
pub fn clean(raw: &str) -> String {
    let mut text = raw.to_string();
    for token in CONTROL_TOKENS.iter().chain(META_LABELS) {
        text = text.replace(token, "");
    }
    let mut text = text.trim();
    loop {
        let stripped = strip_label(text);
        if stripped.len() == text.len() {
            break;
        }
        text = stripped;
    }
    text.to_string()
}

fn strip_label(text: &str) -> &str {
    for label in [DISPLAY_NAME, "Assistant", "model"] {
        if let Some(head) = text.get(..label.len())
            && head.eq_ignore_ascii_case(label)
        {
            let rest = text[label.len()..].trim_start_matches([' ', '\t']);
            if let Some(rest) = rest.strip_prefix(':').or_else(|| rest.strip_prefix('\n')) {
                return rest.trim_start();
            }
        }
    }
    text
}

pub fn english_stopwords(text: &str) -> usize {
    Query::new(text)
        .tokens()
        .iter()
        .filter(|t| ENGLISH_STOPWORDS.contains(&t.as_str()))
        .count()
}

pub fn has_marker(text: &str) -> bool {
    let query = Query::new(text);
    PERSONA_MARKERS.iter().any(|m| query.has(m))
}

/// `reply` unchanged if it carries a marker, else with a marker suffix.
pub fn ensure_marker(reply: String, rng: &mut StdRng) -> String {
    if has_marker(&reply) {
        return reply;
    }
    let suffix = MARKER_SUFFIXES.choose(rng).copied().unwrap_or("myre.");
    format!("{reply} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn gate(require_non_english: bool) -> QualityGate {
        QualityGate::new(&RouterConfig { require_non_english, ..RouterConfig::default() })
    }

    #[test]
    fn clean_strips_tokens_and_labels() {
        assert_eq!(clean("Thani Thankan: Enthuva myre?<end_of_turn>"), "Enthuva myre?");
        assert_eq!(clean("(Raw Thani Thankan) Poda naaye"), "Poda naaye");
        assert_eq!(clean("model\nUmbikko myre</s>"), "Umbikko myre");
        assert_eq!(clean("  plain  "), "plain");
    }

    #[test]
    fn clean_keeps_names_mid_sentence() {
        assert_eq!(clean("Modelling is hard, myre"), "Modelling is hard, myre");
    }

    #[test]
    fn short_and_empty_replies_are_rejected() {
        let g = gate(false);
        assert_eq!(g.check(""), Err(Rejection::Empty));
        assert_eq!(g.check("ok myre"), Err(Rejection::TooShort { chars: 7, min: 10 }));
        assert_eq!(g.check("0123456789"), Err(Rejection::TooShort { chars: 10, min: 10 }));
        assert!(g.check("Enthuva myre? Para.").is_ok());
    }

    #[test]
    fn refusals_are_rejected() {
        let g = gate(false);
        assert_eq!(g.check("I'm sorry, but I cannot help with that."), Err(Rejection::Refusal));
        assert_eq!(g.check("As an AI language model, I..."), Err(Rejection::Refusal));
    }

    #[test]
    fn english_check_only_when_required() {
        let english = "This is what the answer to the question is, and it is for you.";
        assert!(gate(false).check(english).is_ok());
        assert!(matches!(gate(true).check(english), Err(Rejection::TooMuchEnglish { .. })));
        assert!(gate(true).check("Enthuva myre, code ezhuthan padikk aadyam.").is_ok());
    }

    #[test]
    fn marker_appended_only_when_missing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ensure_marker("Poda myre".into(), &mut rng), "Poda myre");
        let out = ensure_marker("Python is a language.".into(), &mut rng);
        assert!(out.starts_with("Python is a language. "));
        assert!(has_marker(&out));
    }

    #[test]
    fn markers_match_whole_words() {
        assert!(!has_marker("Idaho is a state"));
        assert!(has_marker("eda, nirth"));
    }
}
