//! Normalised view of an incoming message.
//!
//! Keyword tests match whole words, so `"hi"` does not fire on `"this"`.
//! Multi-word phrases must appear as consecutive words.

/// Wh-words that open a question in English or Manglish. Auxiliaries
/// (`can`, `is`, `do`) are left out: "can you help me" is a request.
const INTERROGATIVES: &[&str] = &[
    "what", "who", "whom", "whose", "where", "when", "why", "how", "which", "entha", "enthu",
    "enth", "aara", "aaranu", "evide", "eppo", "eppol", "engane", "enthinu", "ethra",
];

#[derive(Debug, Clone)]
pub struct Query<'a> {
    raw: &'a str,
    lower: String,
    tokens: Vec<String>,
}

impl<'a> Query<'a> {
    pub fn new(raw: &'a str) -> Self {
        let lower = raw.trim().to_lowercase();
        let tokens = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { raw, lower, tokens }
    }

    /// The message as typed, trimmed.
    pub fn raw(&self) -> &'a str {
        self.raw.trim()
    }

    /// Lowercased, trimmed text.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Word index where `phrase` first occurs.
    pub fn find(&self, phrase: &str) -> Option<usize> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.is_empty() || words.len() > self.tokens.len() {
            return None;
        }
        self.tokens
            .windows(words.len())
            .position(|w| w.iter().zip(&words).all(|(t, p)| t == p))
    }

    pub fn has(&self, phrase: &str) -> bool {
        self.find(phrase).is_some()
    }

    pub fn has_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.has(p))
    }

    /// Earliest word index among `phrases`.
    pub fn first_of(&self, phrases: &[&str]) -> Option<usize> {
        phrases.iter().filter_map(|p| self.find(p)).min()
    }

    /// Contains `?` or opens with an interrogative word.
    pub fn is_question(&self) -> bool {
        self.lower.contains('?')
            || self
                .tokens
                .first()
                .is_some_and(|t| INTERROGATIVES.contains(&t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whole_words_only() {
        let q = Query::new("Is this thing on?");
        assert!(!q.has("hi"));
        assert!(q.has("this"));
    }

    #[test]
    fn phrases_must_be_consecutive() {
        let q = Query::new("Who is the Prime Minister of India");
        assert!(q.has("prime minister"));
        assert!(!q.has("minister prime"));
        assert_eq!(q.find("india"), Some(6));
    }

    #[test]
    fn punctuation_splits_words() {
        let q = Query::new("india-nte capital, etha??");
        assert_eq!(q.tokens(), &["india", "nte", "capital", "etha"]);
    }

    #[test]
    fn question_detection() {
        assert!(Query::new("capital of france?").is_question());
        assert!(Query::new("What is DNA").is_question());
        assert!(Query::new("aara nee").is_question());
        assert!(!Query::new("tell me a joke").is_question());
        assert!(!Query::new("can you help me with python").is_question());
        assert!(Query::new("can you help me?").is_question());
        assert!(!Query::new("").is_question());
    }

    #[test]
    fn first_of_picks_earliest() {
        let q = Query::new("france or india");
        assert_eq!(q.first_of(&["india", "france"]), Some(0));
        assert_eq!(q.first_of(&["japan"]), None);
    }
}
