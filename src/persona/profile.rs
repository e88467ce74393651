//! Personality profile: canned phrases per intent category.
//!
//! Categories are checked in declaration order when classifying a message;
//! `Default` is last and has no keywords, so it always matches.

use std::fmt;

use super::IDENTITY_PHRASE;

/// Coarse intent bucket for canned replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Identity,
    Greeting,
    Help,
    Programming,
    Motivation,
    Aggressive,
    Default,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Identity => "identity",
            Category::Greeting => "greeting",
            Category::Help => "help",
            Category::Programming => "programming",
            Category::Motivation => "motivation",
            Category::Aggressive => "aggressive",
            Category::Default => "default",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword triggers and candidate phrases for one category.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub category: Category,
    /// Whole-word phrases; any one present selects the category.
    pub keywords: &'static [&'static str],
    pub phrases: Vec<String>,
}

/// Immutable table of categories plus the small interjection set.
#[derive(Debug, Clone)]
pub struct PersonalityProfile {
    entries: Vec<CategoryEntry>,
    interjections: &'static [&'static str],
}

impl PersonalityProfile {
    /// The built-in Thani Thankan profile.
    pub fn thani() -> Self {
        let identity = vec![
            format!("{IDENTITY_PHRASE}, Thani Thankan. Thankan Chettante mood illatha version. Enthuva myre?"),
            format!("{IDENTITY_PHRASE}. Ninte chettan alla, ninte Thani Thankan. Ariyille naaye?"),
            format!("Aara ennu chodikkunno? {IDENTITY_PHRASE}, mone. Baaki onnum chodikkanda."),
        ];

        let entries = vec![
            CategoryEntry {
                category: Category::Identity,
                keywords: &[
                    "who are you",
                    "who r u",
                    "your name",
                    "ur name",
                    "introduce yourself",
                    "nee aara",
                    "nee aaraa",
                    "aara nee",
                    "ningal aara",
                    "ninte peru",
                    "ninte per",
                ],
                phrases: identity,
            },
            CategoryEntry {
                category: Category::Greeting,
                keywords: &[
                    "hi",
                    "hii",
                    "hello",
                    "hey",
                    "helo",
                    "namaskaram",
                    "good morning",
                    "good evening",
                    "good night",
                    "sugamano",
                    "enthokke und",
                    "enthokkeyund",
                ],
                phrases: phrases(&[
                    "Entha monne parpadiy? Vanno nee veendum.",
                    "Ah umb myre… enth parupadiya?",
                    "Hello okke ninte achanodu para. Karyam para, naaye.",
                    "Vannallo. Sugam thanne, ninte shalyam illenkil.",
                ]),
            },
            CategoryEntry {
                category: Category::Help,
                keywords: &[
                    "help",
                    "help me",
                    "assist",
                    "support",
                    "sahayikk",
                    "sahayikkamo",
                    "oru upakaram",
                ],
                phrases: phrases(&[
                    "Sahayam venam alle? Karyam clear aayi para myre, njan nokkam.",
                    "Enthuva myre? Help venamenkil problem enthaanennu muzhuvan para.",
                    "Da kunne… chumma help ennu paranjal pora. Enth patti ennu para.",
                ]),
            },
            CategoryEntry {
                category: Category::Programming,
                keywords: &[
                    "code",
                    "coding",
                    "program",
                    "programming",
                    "python",
                    "javascript",
                    "java",
                    "rust",
                    "bug",
                    "debug",
                    "compile",
                    "compiler",
                    "function",
                    "algorithm",
                    "machine learning",
                    "error",
                ],
                phrases: phrases(&[
                    "Code ezhuthan ariyathe keyboard-il adichittu karyam illa myre. Documentation vaayikk, error message vaayikk.",
                    "Ninte bug ninte thala pole thanne. Print vech nokk, step by step debug cheyy, naaye.",
                    "Python aanelum enthu kunthamaanelum, cheriya cheriya functions aakki ezhuthu. Ninte idea angu pootilu, pakshe logic vende?",
                    "Stack Overflow-il copy adichu nadannal ingane irikkum. Aadhyam problem manassilakk, pinne code cheyy mone.",
                ]),
            },
            CategoryEntry {
                category: Category::Motivation,
                keywords: &[
                    "lazy",
                    "motivate",
                    "motivate me",
                    "motivation",
                    "tired",
                    "bored",
                    "sad",
                    "depressed",
                    "give up",
                    "madi",
                    "madiyaanu",
                    "vishamam",
                ],
                phrases: phrases(&[
                    "Madi pidichu irunnal ninte achan vannu cheyyumo? Ezhunnettu pani edukk myre.",
                    "Kalikunno poori? Oru cheriya pani ippo thanne thudangu, baaki pinne varum.",
                    "Vishamam okke njan kettu. Ini ezhunnettu nadakk. Naale ninakku thanne nanni parayum, naaye.",
                    "Give up cheyyan aanenkil nee thudangendaayirunnu. Oru step koodi vekk mone.",
                ]),
            },
            CategoryEntry {
                category: Category::Aggressive,
                keywords: &[
                    "stupid",
                    "idiot",
                    "fool",
                    "shut up",
                    "useless",
                    "poda",
                    "podaa",
                    "thendi",
                    "mandan",
                    "myre",
                    "naaye",
                ],
                phrases: phrases(&[
                    "Eda thayoli… nirth ninte konapp, pulle.",
                    "Enth konayadi aada myre? Ennodu thanne venda.",
                    "Ninte achan ang pootilu. Njan poyi ente kaaryam nokkatte.",
                    "Nee thanne oru konayadi case aanu. Poyi vellam kudikk.",
                ]),
            },
            CategoryEntry {
                category: Category::Default,
                keywords: &[],
                phrases: phrases(&[
                    "Enthuva myre? Onnum manassilayilla. Vere enthelum chodikk.",
                    "Umbikko myre. Nee paranjathu enikku pidikittiyilla.",
                    "Ne enthelum kanikk..shavam. Karyam clear aayi para.",
                    "Da kunne… onnum arinjille? Sheriyaayi type cheyy.",
                ]),
            },
        ];

        Self {
            entries,
            interjections: &[
                "Naaye!",
                "Myre!",
                "Njan poyi ente kaaryam nokkatte.",
                "Ninte idea angu pootilu.",
                "Mone, manassilaayo?",
            ],
        }
    }

    /// Categories in classification priority order.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Candidate phrases for `category`. Never empty for the built-in profile.
    pub fn phrases(&self, category: Category) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.phrases.as_slice())
            .unwrap_or_default()
    }

    pub fn interjections(&self) -> &[&'static str] {
        self.interjections
    }
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self::thani()
    }
}

fn phrases(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_phrases() {
        let profile = PersonalityProfile::thani();
        for entry in profile.entries() {
            assert!(!entry.phrases.is_empty(), "{} has no phrases", entry.category);
        }
    }

    #[test]
    fn default_is_last_and_keywordless() {
        let profile = PersonalityProfile::thani();
        let last = profile.entries().last().unwrap();
        assert_eq!(last.category, Category::Default);
        assert!(last.keywords.is_empty());
    }

    #[test]
    fn identity_phrases_carry_identity_phrase() {
        let profile = PersonalityProfile::thani();
        for p in profile.phrases(Category::Identity) {
            assert!(p.contains(IDENTITY_PHRASE));
        }
    }

    #[test]
    fn priority_order_is_fixed() {
        let order: Vec<_> = PersonalityProfile::thani().entries().iter().map(|e| e.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Identity,
                Category::Greeting,
                Category::Help,
                Category::Programming,
                Category::Motivation,
                Category::Aggressive,
                Category::Default,
            ]
        );
    }
}
