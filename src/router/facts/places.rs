//! Countries, Indian states and continents the fact rules recognise.

use crate::router::query::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Country,
    State,
    Continent,
}

#[derive(Debug, Clone, Copy)]
pub struct Place {
    /// Stable key, also used by `[facts.*]` config overrides.
    pub key: &'static str,
    pub name: &'static str,
    pub kind: PlaceKind,
    /// Whole-word spellings, lowercase.
    pub aliases: &'static [&'static str],
    pub capital: Option<&'static str>,
}

const fn country(
    key: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    capital: &'static str,
) -> Place {
    Place { key, name, kind: PlaceKind::Country, aliases, capital: Some(capital) }
}

const fn state(
    key: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    capital: &'static str,
) -> Place {
    Place { key, name, kind: PlaceKind::State, aliases, capital: Some(capital) }
}

const fn continent(key: &'static str, name: &'static str, aliases: &'static [&'static str]) -> Place {
    Place { key, name, kind: PlaceKind::Continent, aliases, capital: None }
}

pub const PLACES: &[Place] = &[
    country("india", "India", &["india", "indian", "bharat", "indiayude"], "New Delhi"),
    country(
        "usa",
        "USA",
        &["usa", "america", "american", "united states", "united states of america", "us of a"],
        "Washington DC",
    ),
    country("uk", "UK", &["uk", "united kingdom", "britain", "great britain", "england", "british"], "London"),
    country("france", "France", &["france", "french"], "Paris"),
    country("japan", "Japan", &["japan", "japanese"], "Tokyo"),
    country("china", "China", &["china", "chinese"], "Beijing"),
    country("germany", "Germany", &["germany", "german"], "Berlin"),
    country("italy", "Italy", &["italy", "italian"], "Rome"),
    country("russia", "Russia", &["russia", "russian"], "Moscow"),
    country("australia", "Australia", &["australia", "australian"], "Canberra"),
    country("canada", "Canada", &["canada", "canadian"], "Ottawa"),
    country("brazil", "Brazil", &["brazil", "brazilian"], "Brasilia"),
    country("spain", "Spain", &["spain", "spanish"], "Madrid"),
    country("pakistan", "Pakistan", &["pakistan", "pakistani"], "Islamabad"),
    country("sri_lanka", "Sri Lanka", &["sri lanka", "srilanka", "lanka"], "Sri Jayawardenepura Kotte"),
    country("nepal", "Nepal", &["nepal"], "Kathmandu"),
    country("bangladesh", "Bangladesh", &["bangladesh"], "Dhaka"),
    country("uae", "UAE", &["uae", "united arab emirates", "emirates"], "Abu Dhabi"),
    country("saudi_arabia", "Saudi Arabia", &["saudi", "saudi arabia"], "Riyadh"),
    country("egypt", "Egypt", &["egypt"], "Cairo"),
    country("south_africa", "South Africa", &["south africa"], "Pretoria"),
    state("kerala", "Kerala", &["kerala", "keralam", "keralathinte"], "Thiruvananthapuram"),
    state("tamil_nadu", "Tamil Nadu", &["tamil nadu", "tamilnadu", "tn"], "Chennai"),
    state("karnataka", "Karnataka", &["karnataka"], "Bengaluru"),
    state("andhra_pradesh", "Andhra Pradesh", &["andhra pradesh", "andhra"], "Amaravati"),
    state("telangana", "Telangana", &["telangana"], "Hyderabad"),
    state("maharashtra", "Maharashtra", &["maharashtra"], "Mumbai"),
    state("goa", "Goa", &["goa"], "Panaji"),
    state("west_bengal", "West Bengal", &["west bengal", "bengal"], "Kolkata"),
    state("gujarat", "Gujarat", &["gujarat"], "Gandhinagar"),
    state("punjab", "Punjab", &["punjab"], "Chandigarh"),
    continent("africa", "Africa", &["africa", "african"]),
    continent("europe", "Europe", &["europe"]),
    continent("asia", "Asia", &["asia"]),
];

/// The place mentioned earliest in `query`. Among places starting at the
/// same word, the one with the longer alias wins (`south africa` beats
/// `africa`), then declaration order.
pub fn find_place(query: &Query) -> Option<&'static Place> {
    PLACES
        .iter()
        .filter_map(|place| {
            place
                .aliases
                .iter()
                .filter_map(|alias| query.find(alias).map(|pos| (pos, alias.split_whitespace().count())))
                .min_by_key(|&(pos, len)| (pos, std::cmp::Reverse(len)))
                .map(|(pos, len)| (pos, len, place))
        })
        .min_by_key(|&(pos, len, _)| (pos, std::cmp::Reverse(len)))
        .map(|(_, _, place)| place)
}

pub fn by_key(key: &str) -> Option<&'static Place> {
    PLACES.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(msg: &str) -> Option<&'static str> {
        find_place(&Query::new(msg)).map(|p| p.key)
    }

    #[test]
    fn finds_by_alias() {
        assert_eq!(key_of("indian president aara"), Some("india"));
        assert_eq!(key_of("USA nte capital city etha kunne"), Some("usa"));
        assert_eq!(key_of("capital of tamil nadu"), Some("tamil_nadu"));
    }

    #[test]
    fn longer_alias_wins_at_same_position() {
        assert_eq!(key_of("president of south africa"), Some("south_africa"));
        assert_eq!(key_of("president of africa"), Some("africa"));
    }

    #[test]
    fn earliest_mention_wins() {
        assert_eq!(key_of("japan or france"), Some("japan"));
    }

    #[test]
    fn no_substring_matches() {
        assert_eq!(key_of("the usage of goats"), None);
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in PLACES.iter().enumerate() {
            assert!(PLACES[i + 1..].iter().all(|b| b.key != a.key), "duplicate key {}", a.key);
        }
    }
}
