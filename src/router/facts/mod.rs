//! Literal fact interception: the first routing stage.
//!
//! [`RULES`] is an ordered table of `(matches, answer)` pairs. A rule whose
//! `matches` fires gets a chance to answer; `answer` may still return `None`
//! (arithmetic it cannot parse, a topic it does not know), in which case later
//! rules are tried. Only the final wording is random.

pub mod arithmetic;
pub mod knowledge;
pub mod offices;
pub mod places;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use self::arithmetic::Outcome;
use self::knowledge::Topic;
use self::offices::{Office, Offices};
use self::places::{Place, PlaceKind};
use super::fill;
use super::query::Query;
use crate::config::FactsConfig;

/// A fact rule's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactAnswer {
    pub rule: &'static str,
    /// What the answer is about: a place key, a topic, an expression.
    /// `None` for clarification phrases.
    pub entity: Option<String>,
    pub text: String,
}

type Matcher = fn(&Query) -> bool;
type Answer = fn(&FactBook, &Query, &mut StdRng) -> Option<FactAnswer>;

pub struct FactRule {
    pub name: &'static str,
    pub matches: Matcher,
    pub answer: Answer,
}

/// Checked top to bottom; the first rule that answers wins.
pub const RULES: &[FactRule] = &[
    FactRule { name: "capital", matches: asks_capital, answer: capital },
    FactRule { name: "president", matches: asks_president, answer: president },
    FactRule { name: "prime_minister", matches: asks_prime_minister, answer: prime_minister },
    FactRule { name: "chief_minister", matches: asks_chief_minister, answer: chief_minister },
    FactRule { name: "arithmetic", matches: asks_arithmetic, answer: arithmetic },
    FactRule { name: "knowledge", matches: asks_knowledge, answer: knowledge },
    FactRule { name: "how_many", matches: asks_how_many, answer: how_many },
    FactRule { name: "when_did", matches: asks_when_did, answer: when_did },
];

/// Fact tables resolved against config.
#[derive(Debug, Clone, Default)]
pub struct FactBook {
    offices: Offices,
}

impl FactBook {
    pub fn new(facts: &FactsConfig) -> Self {
        Self { offices: Offices::new(facts) }
    }

    /// Run [`RULES`] in order and return the first answer.
    pub fn intercept(&self, query: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
        if query.is_empty() {
            return None;
        }
        RULES
            .iter()
            .filter(|rule| (rule.matches)(query))
            .find_map(|rule| (rule.answer)(self, query, rng))
    }
}

fn choose<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

// ── Capitals ──────────────────────────────────────────────────────────────────

const CAPITAL_WORDS: &[&str] = &["capital", "capital city", "thalasthanam", "thalasthaanam"];

const CAPITAL_ANSWERS: &[&str] = &[
    "{place}-nte capital {capital} aanu myre. Ithu polum ariyille?",
    "{capital}. {place}-nte capital. Atlas eduthu nokk mone.",
    "Eda kunne, {place}-nte thalasthanam {capital} aanu. Ini chodikkalle.",
    "{capital} aanu, naaye. School-il urangi irunno?",
];

const CAPITAL_UNKNOWN: &[&str] = &[
    "Ethu naattile capital aanu myre? Sthalathinte peru koode para.",
    "Capital chodikkumbol country-o state-o peru parayanam mone. Enthu naadu?",
];

const CAPITAL_CONTINENT: &[&str] = &[
    "{place} oru continent aanu myre, athinu capital illa. Country peru para.",
    "Continent-nu capital illa naaye. {place}-il ethu country aanu uddeshichathu?",
];

fn asks_capital(q: &Query) -> bool {
    q.has_any(CAPITAL_WORDS)
}

fn capital(_: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    let Some(place) = places::find_place(q) else {
        return Some(clarification("capital", choose(rng, CAPITAL_UNKNOWN).to_string()));
    };
    let text = match place.capital {
        Some(capital) => fill(choose(rng, CAPITAL_ANSWERS), &[("place", place.name), ("capital", capital)]),
        None => fill(choose(rng, CAPITAL_CONTINENT), &[("place", place.name)]),
    };
    Some(about("capital", place, text))
}

// ── Office holders ────────────────────────────────────────────────────────────

const HOLDER_ANSWERS: &[&str] = &[
    "{place}-nte {title} {holder} aanu myre{as_of}.",
    "{holder}. {place}-nte {title}{as_of}. Paper vaayikk mone.",
    "Eda, {place}-nte {title} {holder} aanu{as_of}. Ithu ariyathe vote cheyyalle.",
];

const HOLDER_UNKNOWN: &[&str] = &[
    "{place}-nte {title} aarennu enikku urappilla myre. Google cheyy.",
    "{place}-nte {title}? Athu ente list-il illa mone. Vere vallathum chodikk.",
];

const OFFICE_NO_PLACE: &[&str] = &[
    "Ethu naattile {title} aanu myre? Peru koode para.",
    "{title} ennu maathram paranjal pora naaye. Ethu country, ethu state?",
];

const OFFICE_CONTINENT: &[&str] = &[
    "{place} oru continent aanu myre, country alla. Continent-nu {title} illa.",
    "Eda kunne, {place} continent aanu. Athil orupaadu countries und, ethu country-de {title} aanu venda?",
];

const OFFICE_WRONG_KIND: &[&str] = &[
    "{place}-nu {title} illa myre. {place} oru {kind} aanu, avide {other} aanu.",
    "{place} {kind} aanu mone, {title} alla {other} aanu chodikkendathu.",
];

fn asks_president(q: &Query) -> bool {
    names_office(q, Office::President)
}

fn asks_prime_minister(q: &Query) -> bool {
    names_office(q, Office::PrimeMinister)
}

fn asks_chief_minister(q: &Query) -> bool {
    names_office(q, Office::ChiefMinister)
}

/// Full titles always count. Abbreviations (`pm`, `cm`) right after a
/// number are units (`5 cm`, `3 pm`), not offices.
fn names_office(q: &Query, office: Office) -> bool {
    if q.has_any(office.keywords()) {
        return true;
    }
    let tokens = q.tokens();
    tokens.iter().enumerate().any(|(i, t)| {
        office.abbreviations().contains(&t.as_str())
            && !i.checked_sub(1).is_some_and(|p| tokens[p].chars().all(|c| c.is_ascii_digit()))
    })
}

fn president(book: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    Some(office_answer(book, Office::President, q, rng))
}

fn prime_minister(book: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    Some(office_answer(book, Office::PrimeMinister, q, rng))
}

fn chief_minister(book: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    Some(office_answer(book, Office::ChiefMinister, q, rng))
}

fn office_answer(book: &FactBook, office: Office, q: &Query, rng: &mut StdRng) -> FactAnswer {
    let rule = office.rule();
    let title = office.title();
    let Some(place) = places::find_place(q) else {
        return clarification(rule, fill(choose(rng, OFFICE_NO_PLACE), &[("title", title)]));
    };
    let vars = [("place", place.name), ("title", title)];

    if place.kind == PlaceKind::Continent {
        return about(rule, place, fill(choose(rng, OFFICE_CONTINENT), &vars));
    }
    if !office.applies_to(place.kind) {
        let (kind, other) = match place.kind {
            PlaceKind::State => ("state", "Chief Minister"),
            _ => ("country", "President allenkil Prime Minister"),
        };
        let text = fill(
            choose(rng, OFFICE_WRONG_KIND),
            &[("place", place.name), ("title", title), ("kind", kind), ("other", other)],
        );
        return about(rule, place, text);
    }

    let text = match book.offices.holder(office, place) {
        Some(holder) => {
            let as_of = holder.as_of.map(|y| format!(" ({y} vare ulla kanakku)")).unwrap_or_default();
            fill(
                choose(rng, HOLDER_ANSWERS),
                &[("place", place.name), ("title", title), ("holder", holder.name.as_str()), ("as_of", as_of.as_str())],
            )
        }
        None => fill(choose(rng, HOLDER_UNKNOWN), &vars),
    };
    about(rule, place, text)
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

const SUM_ANSWERS: &[&str] = &[
    "{expr} = {result}. Ithinu calculator venda myre.",
    "Utharam {result} aanu. {expr}, simple alle mone?",
    "{result}, naaye. School-il kanakku padichille?",
];

const QUOTIENT_ANSWERS: &[&str] = &[
    "{expr} = {quotient}, remainder {remainder}. Muzhuvan aayi pokilla myre.",
    "{quotient} kittum, baaki {remainder}. Manassilaayo mone?",
];

const DIVIDE_BY_ZERO: &[&str] = &[
    "Poojyam kondu harikkan pattilla myre. {expr} undefined aanu.",
    "Zero kondu divide cheyyano? Ninte thala pole thanne, undefined, naaye.",
];

fn asks_arithmetic(q: &Query) -> bool {
    arithmetic::mentions_operator(q.lower())
}

fn arithmetic(_: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    let expr = arithmetic::parse(q.lower())?;
    let shown = expr.to_string();
    let text = match expr.eval() {
        Outcome::Value(v) => fill(choose(rng, SUM_ANSWERS), &[("expr", shown.as_str()), ("result", v.to_string().as_str())]),
        Outcome::Quotient { quotient, remainder } => fill(
            choose(rng, QUOTIENT_ANSWERS),
            &[
                ("expr", shown.as_str()),
                ("quotient", quotient.to_string().as_str()),
                ("remainder", remainder.to_string().as_str()),
            ],
        ),
        Outcome::DivideByZero => fill(choose(rng, DIVIDE_BY_ZERO), &[("expr", shown.as_str())]),
    };
    Some(FactAnswer { rule: "arithmetic", entity: Some(shown), text })
}

// ── Knowledge topics and literal forms ────────────────────────────────────────

const EXPLAIN_WORDS: &[&str] = &["tell me about", "explain", "define", "parayamo", "paranju tha"];

fn asks_knowledge(q: &Query) -> bool {
    q.is_question() || q.has_any(EXPLAIN_WORDS)
}

fn asks_how_many(q: &Query) -> bool {
    q.has_any(&["how many", "ethra"])
}

fn asks_when_did(q: &Query) -> bool {
    q.has_any(&["when did", "when was", "when is", "eppo", "eppozhaanu", "eppol"])
}

fn knowledge(_: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    topic_answer("knowledge", knowledge::TOPICS, q, rng)
}

fn how_many(_: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    topic_answer("how_many", knowledge::COUNTS, q, rng)
}

fn when_did(_: &FactBook, q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    topic_answer("when_did", knowledge::EVENTS, q, rng)
}

fn topic_answer(rule: &'static str, table: &[Topic], q: &Query, rng: &mut StdRng) -> Option<FactAnswer> {
    let topic = knowledge::lookup(table, q)?;
    Some(FactAnswer {
        rule,
        entity: Some(topic.key.to_string()),
        text: choose(rng, topic.answers).to_string(),
    })
}

fn about(rule: &'static str, place: &Place, text: String) -> FactAnswer {
    FactAnswer { rule, entity: Some(place.key.to_string()), text }
}

fn clarification(rule: &'static str, text: String) -> FactAnswer {
    FactAnswer { rule, entity: None, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn ask(msg: &str) -> Option<FactAnswer> {
        ask_with(&FactBook::default(), msg, 0)
    }

    fn ask_with(book: &FactBook, msg: &str, seed: u64) -> Option<FactAnswer> {
        book.intercept(&Query::new(msg), &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn capital_of_known_place() {
        for seed in 0..8 {
            let a = ask_with(&FactBook::default(), "What is the capital of France?", seed).unwrap();
            assert_eq!(a.rule, "capital");
            assert_eq!(a.entity.as_deref(), Some("france"));
            assert!(a.text.contains("Paris"), "{}", a.text);
        }
        let a = ask("kerala capital etha").unwrap();
        assert!(a.text.contains("Thiruvananthapuram"));
    }

    #[test]
    fn capital_without_place_asks_to_specify() {
        let a = ask("what is the capital").unwrap();
        assert_eq!(a.rule, "capital");
        assert_eq!(a.entity, None);
        assert!(CAPITAL_UNKNOWN.contains(&a.text.as_str()));
    }

    #[test]
    fn africa_is_a_continent() {
        let a = ask("who is the president of africa").unwrap();
        assert_eq!(a.rule, "president");
        assert_eq!(a.entity.as_deref(), Some("africa"));
        assert!(a.text.contains("continent"));

        let a = ask("president of south africa").unwrap();
        assert!(a.text.contains("Cyril Ramaphosa"));
    }

    #[test]
    fn office_holders_name_snapshot_year() {
        let a = ask("Who is the prime minister of India?").unwrap();
        assert_eq!(a.rule, "prime_minister");
        assert!(a.text.contains("Narendra Modi"));
        assert!(a.text.contains(&offices::AS_OF.to_string()));
    }

    #[test]
    fn office_on_wrong_kind_of_place() {
        let a = ask("who is the president of kerala").unwrap();
        assert_eq!(a.entity.as_deref(), Some("kerala"));
        assert!(a.text.contains("Chief Minister"));
        let a = ask("chief minister of france").unwrap();
        assert!(a.text.contains("country"));
    }

    #[test]
    fn office_override_from_config() {
        let mut facts = FactsConfig::default();
        facts.chief_ministers.insert("kerala".into(), "Test Person".into());
        let book = FactBook::new(&facts);
        let a = ask_with(&book, "kerala cm aara", 3).unwrap();
        assert!(a.text.contains("Test Person"));
        assert!(!a.text.contains("vare ulla kanakku"));
    }

    #[test]
    fn arithmetic_answers_contain_result() {
        let a = ask("5 + 3").unwrap();
        assert_eq!(a.rule, "arithmetic");
        assert_eq!(a.entity.as_deref(), Some("5 + 3"));
        assert!(a.text.contains('8'));
        assert!(ask("what is 12 plus 30").unwrap().text.contains("42"));
        assert!(ask("7 divided by 2").unwrap().text.contains('1'));
        assert!(ask("9 / 0").unwrap().text.contains("undefined"));
    }

    #[test]
    fn arithmetic_ignores_numbers_away_from_the_operator() {
        for msg in ["Question 1: what is 5 + 3", "in 2024 what is 5 + 3"] {
            let a = ask(msg).unwrap();
            assert_eq!(a.rule, "arithmetic");
            assert_eq!(a.entity.as_deref(), Some("5 + 3"), "{msg}");
            assert!(a.text.contains('8'), "{msg}: {}", a.text);
        }
    }

    #[test]
    fn decimal_arithmetic_is_not_answered() {
        assert_eq!(ask("2.5 + 1.5"), None);
        let a = ask("-5 + 3").unwrap();
        assert_eq!(a.entity.as_deref(), Some("-5 + 3"));
        assert!(a.text.contains("-2"));
    }

    #[test]
    fn big_sums_are_exact() {
        let a = ask("99999999999999999999 + 1").unwrap();
        assert_eq!(a.rule, "arithmetic");
        assert!(a.text.contains("100000000000000000000"));
        let a = ask("9223372036854775807 + 1").unwrap();
        assert!(a.text.contains("9223372036854775808"));
    }

    #[test]
    fn units_after_numbers_are_not_offices() {
        let a = ask("what is 5 cm + 3 cm").unwrap();
        assert_eq!(a.rule, "arithmetic");
        assert!(a.text.contains('8'));
        let a = ask("5 pm plus 3").unwrap();
        assert_eq!(a.rule, "arithmetic");
        // The abbreviation still names the office elsewhere.
        assert_eq!(ask("kerala cm aara").unwrap().rule, "chief_minister");
        assert_eq!(ask("who is the pm of india").unwrap().rule, "prime_minister");
    }

    #[test]
    fn unparseable_arithmetic_falls_through() {
        // "plus" fires the arithmetic rule but there are no numbers; the
        // knowledge rule then answers.
        let a = ask("what is the sun plus the moon?").unwrap();
        assert_eq!(a.rule, "knowledge");
        assert_eq!(ask("plus something"), None);
    }

    #[test]
    fn knowledge_and_literal_forms() {
        assert_eq!(ask("What is photosynthesis?").unwrap().entity.as_deref(), Some("photosynthesis"));
        let a = ask("How many continents are there?").unwrap();
        assert_eq!(a.rule, "how_many");
        assert!(a.text.contains('7'));
        let a = ask("How many states in India?").unwrap();
        assert!(a.text.contains("28"));
        let a = ask("When did the French Revolution happen").unwrap();
        assert_eq!(a.rule, "when_did");
        assert!(a.text.contains("1789"));
    }

    #[test]
    fn unknown_messages_pass_through() {
        assert_eq!(ask("asdkjasdlk"), None);
        assert_eq!(ask(""), None);
        assert_eq!(ask("tell me a joke"), None);
    }

    #[test]
    fn rules_run_in_fixed_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["capital", "president", "prime_minister", "chief_minister", "arithmetic", "knowledge", "how_many", "when_did"]
        );
        // "capital" outranks arithmetic and knowledge in the same message.
        let a = ask("what is the capital of india, and 2 + 2?").unwrap();
        assert_eq!(a.rule, "capital");
    }

    #[test]
    fn entity_is_stable_across_seeds() {
        let entities: Vec<_> = (0..10)
            .map(|seed| ask_with(&FactBook::default(), "capital of japan?", seed).unwrap().entity)
            .collect();
        assert!(entities.iter().all(|e| e.as_deref() == Some("japan")));
    }
}
