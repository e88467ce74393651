//! Category fallback: the last routing stage. Cannot fail.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::fill;
use super::query::Query;
use crate::persona::{Category, PersonalityProfile};

/// Used when a question reaches this stage. `{question}` echoes it back.
const CLARIFY: &[&str] = &[
    "\"{question}\" ennu chodichal enikku ippo utharam illa myre. Onnu koode clear aayi chodikk.",
    "Enthuva myre? \"{question}\"... athu enikku pidikittiyilla. Vere reethiyil chodikk.",
    "\"{question}\"? Ithinu utharam ente kayyil illa mone. Kurachu koode vishadhamaayi para.",
];

/// Last resort when a profile has no phrases for a category.
const LAST_RESORT: &str = "Enthuva myre? Onnum manassilayilla.";

/// First category whose keywords appear in `query`, `Default` otherwise.
pub fn classify(profile: &PersonalityProfile, query: &Query) -> Category {
    profile
        .entries()
        .iter()
        .find(|e| query.has_any(e.keywords))
        .map_or(Category::Default, |e| e.category)
}

/// Clarification phrase echoing the question text.
pub fn clarify(query: &Query, rng: &mut StdRng) -> String {
    let template = CLARIFY.choose(rng).copied().unwrap_or(CLARIFY[0]);
    fill(template, &[("question", query.raw())])
}

/// A phrase from `category`, with an interjection appended with
/// `probability`.
pub fn category_phrase(
    profile: &PersonalityProfile,
    category: Category,
    probability: f64,
    rng: &mut StdRng,
) -> String {
    let phrase = profile
        .phrases(category)
        .choose(rng)
        .or_else(|| profile.phrases(Category::Default).choose(rng))
        .map_or(LAST_RESORT, String::as_str);

    if rng.gen_bool(probability.clamp(0.0, 1.0))
        && let Some(extra) = profile.interjections().choose(rng)
    {
        return format!("{phrase} {extra}");
    }
    phrase.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn category(msg: &str) -> Category {
        classify(&PersonalityProfile::thani(), &Query::new(msg))
    }

    #[test]
    fn classification_follows_priority() {
        assert_eq!(category("Who are you?"), Category::Identity);
        assert_eq!(category("hi, who are you"), Category::Identity);
        assert_eq!(category("hello there"), Category::Greeting);
        assert_eq!(category("help me with python"), Category::Help);
        assert_eq!(category("my python code has a bug"), Category::Programming);
        assert_eq!(category("i feel lazy today"), Category::Motivation);
        assert_eq!(category("you are stupid"), Category::Aggressive);
        assert_eq!(category("asdkjasdlk"), Category::Default);
        assert_eq!(category(""), Category::Default);
    }

    #[test]
    fn clarify_echoes_question() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = Query::new("  what is the meaning of life?  ");
        let out = clarify(&q, &mut rng);
        assert!(out.contains("what is the meaning of life?"));
    }

    #[test]
    fn phrase_comes_from_category_with_optional_interjection() {
        let profile = PersonalityProfile::thani();
        let candidates = profile.phrases(Category::Default);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = category_phrase(&profile, Category::Default, 0.5, &mut rng);
            let base = candidates.iter().find(|c| out.starts_with(c.as_str())).expect("not a default phrase");
            let rest = out[base.len()..].trim_start();
            assert!(rest.is_empty() || profile.interjections().contains(&rest), "{out}");
        }
    }

    #[test]
    fn probability_bounds() {
        let profile = PersonalityProfile::thani();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            let never = category_phrase(&profile, Category::Greeting, 0.0, &mut rng);
            assert!(profile.phrases(Category::Greeting).contains(&never));
            let always = category_phrase(&profile, Category::Greeting, 1.0, &mut rng);
            assert!(!profile.phrases(Category::Greeting).contains(&always));
        }
    }
}
