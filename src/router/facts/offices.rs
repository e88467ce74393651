//! President, prime-minister and chief-minister lookups.
//!
//! The built-in holders are a snapshot and go stale; every answer drawn from
//! them names the snapshot year. `[facts.*]` config entries replace single
//! holders and are reported without a year.

use std::collections::HashMap;

use tracing::warn;

use super::places::{self, Place, PlaceKind};
use crate::config::FactsConfig;

/// Year the built-in tables were last checked.
pub const AS_OF: u16 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Office {
    President,
    PrimeMinister,
    ChiefMinister,
}

impl Office {
    pub const ALL: [Office; 3] = [Office::President, Office::PrimeMinister, Office::ChiefMinister];

    pub fn title(self) -> &'static str {
        match self {
            Office::President => "President",
            Office::PrimeMinister => "Prime Minister",
            Office::ChiefMinister => "Chief Minister",
        }
    }

    /// Name of the fact rule answering for this office.
    pub fn rule(self) -> &'static str {
        match self {
            Office::President => "president",
            Office::PrimeMinister => "prime_minister",
            Office::ChiefMinister => "chief_minister",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Office::President => &["president", "rashtrapathi"],
            Office::PrimeMinister => &["prime minister", "pradhanamanthri", "pradhana manthri"],
            Office::ChiefMinister => &["chief minister", "mukhyamanthri", "mukhya manthri"],
        }
    }

    /// Short forms that double as units (`5 pm`, `3 cm`).
    pub fn abbreviations(self) -> &'static [&'static str] {
        match self {
            Office::President => &[],
            Office::PrimeMinister => &["pm"],
            Office::ChiefMinister => &["cm"],
        }
    }

    /// Whether places of `kind` have this office at all.
    pub fn applies_to(self, kind: PlaceKind) -> bool {
        match self {
            Office::President | Office::PrimeMinister => kind == PlaceKind::Country,
            Office::ChiefMinister => kind == PlaceKind::State,
        }
    }

    fn builtin(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Office::President => &[
                ("usa", "Joe Biden"),
                ("india", "Droupadi Murmu"),
                ("france", "Emmanuel Macron"),
                ("russia", "Vladimir Putin"),
                ("china", "Xi Jinping"),
                ("brazil", "Luiz Inácio Lula da Silva"),
                ("south_africa", "Cyril Ramaphosa"),
            ],
            Office::PrimeMinister => &[
                ("india", "Narendra Modi"),
                ("uk", "Keir Starmer"),
                ("japan", "Shigeru Ishiba"),
                ("australia", "Anthony Albanese"),
                ("canada", "Justin Trudeau"),
                ("pakistan", "Shehbaz Sharif"),
                ("nepal", "K. P. Sharma Oli"),
            ],
            Office::ChiefMinister => &[
                ("kerala", "Pinarayi Vijayan"),
                ("tamil_nadu", "M. K. Stalin"),
                ("karnataka", "Siddaramaiah"),
                ("andhra_pradesh", "N. Chandrababu Naidu"),
                ("telangana", "Revanth Reddy"),
                ("maharashtra", "Devendra Fadnavis"),
                ("west_bengal", "Mamata Banerjee"),
                ("goa", "Pramod Sawant"),
                ("gujarat", "Bhupendra Patel"),
                ("punjab", "Bhagwant Mann"),
            ],
        }
    }
}

/// Who holds an office, and which snapshot year that comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holder {
    pub name: String,
    /// `None` for config overrides.
    pub as_of: Option<u16>,
}

/// Resolved holders for all three offices.
#[derive(Debug, Clone)]
pub struct Offices {
    tables: HashMap<(Office, &'static str), Holder>,
}

impl Offices {
    /// Built-in tables with `overrides` applied. Override keys that name no
    /// known place are logged and skipped.
    pub fn new(overrides: &FactsConfig) -> Self {
        let mut tables = HashMap::new();
        for office in Office::ALL {
            for &(key, name) in office.builtin() {
                tables.insert(
                    (office, key),
                    Holder { name: name.to_string(), as_of: Some(AS_OF) },
                );
            }
            for (key, name) in overrides_for(overrides, office) {
                match places::by_key(key) {
                    Some(place) => {
                        tables.insert(
                            (office, place.key),
                            Holder { name: name.clone(), as_of: None },
                        );
                    }
                    None => warn!(office = office.rule(), key = %key, "unknown place in facts override, ignored"),
                }
            }
        }
        Self { tables }
    }

    pub fn holder(&self, office: Office, place: &Place) -> Option<&Holder> {
        self.tables.get(&(office, place.key))
    }
}

impl Default for Offices {
    fn default() -> Self {
        Self::new(&FactsConfig::default())
    }
}

fn overrides_for(facts: &FactsConfig, office: Office) -> &HashMap<String, String> {
    match office {
        Office::President => &facts.presidents,
        Office::PrimeMinister => &facts.prime_ministers,
        Office::ChiefMinister => &facts.chief_ministers,
    }
}
