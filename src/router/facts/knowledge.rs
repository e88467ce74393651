//! General-knowledge topics plus the fixed "how many" and "when did" forms.
//!
//! A topic fires when every phrase of any one of its trigger groups is
//! present. Earlier topics win, so specific ones (`moon landing`) sit above
//! broad ones (`moon`).

use crate::router::query::Query;

#[derive(Debug)]
pub struct Topic {
    pub key: &'static str,
    pub triggers: &'static [&'static [&'static str]],
    pub answers: &'static [&'static str],
}

impl Topic {
    pub fn matches(&self, query: &Query) -> bool {
        self.triggers
            .iter()
            .any(|group| group.iter().all(|phrase| query.has(phrase)))
    }
}

pub const TOPICS: &[Topic] = &[
    Topic {
        key: "moon landing",
        triggers: &[&["moon", "landing"], &["moon", "landed"], &["first", "moon"], &["apollo", "11"], &["neil", "armstrong"]],
        answers: &[
            "Apollo 11, 20 July 1969. Neil Armstrong aanu aadyam chandranil kaal vechathu, pinne Buzz Aldrin. Nee ippozhum bed-il ninnu irangiyittilla myre.",
            "1969 July 20-nu Neil Armstrong moon-il irangi. \"One small step\" okke paranju. Ninte oru step evide, naaye?",
        ],
    },
    Topic {
        key: "solar system",
        triggers: &[&["solar", "system"], &["planets"]],
        answers: &[
            "Solar system-il 8 planets und: Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, Neptune. Pluto-ne 2006-il purathakki, ninne pole thanne myre.",
            "Sun-um athine chuttunna 8 planets-um aanu solar system. Ettavum valuthu Jupiter. Ithu polum ariyille mone?",
        ],
    },
    Topic {
        key: "sun",
        triggers: &[&["sun"], &["sooryan"]],
        answers: &[
            "Sun oru star aanu myre, ekadesham 4.6 billion varsham praayam. Bhoomiyil ninnu 150 million km dooram. Athil nokki irikkalle, kannu pokum.",
            "Sooryan oru valiya hydrogen-helium gas bhandaaram aanu, nuclear fusion vazhi kathunnu. Light bhoomiyil ethaan 8 minute edukkum, naaye.",
        ],
    },
    Topic {
        key: "moon",
        triggers: &[&["moon"], &["chandran"]],
        answers: &[
            "Moon bhoomiyude ore oru natural satellite aanu. Dooram ekadesham 384,400 km. Ninte thalayil ulla pole athilum ellam kuzhikal aanu myre.",
            "Chandran 27.3 divasam kondu bhoomiye oru round chuttum. Swantham light illa, sooryante light reflect cheyyunnu, ninne pole thanne naaye.",
        ],
    },
    Topic {
        key: "boiling point of water",
        triggers: &[&["boiling", "point"], &["water", "boil"], &["water", "boils"]],
        answers: &[
            "Vellam sea level-il 100°C-il thilakkum (212°F). Mala mukalil poyal athilum kuravu. Chaya vekkan polum ariyille myre?",
            "100 degree Celsius, standard pressure-il. Ithu school-il padippichathalle mone?",
        ],
    },
    Topic {
        key: "gravity",
        triggers: &[&["gravity"], &["gravitation"], &["guruthwakarshanam"]],
        answers: &[
            "Gravity aanu ellathineyum thazhekku valikkunna force. Bhoomiyil acceleration 9.8 m/s². Newton aanu aadyam explain cheythathu, aappil veenathu kandu. Ninte thalayil onnum veenilla myre.",
            "Mass ulla ella saadhanangalum parasparam valikkum, athaanu gravity. Einstein athine spacetime-nte valav aayi paranju. Manassilaayo naaye?",
        ],
    },
    Topic {
        key: "dna",
        triggers: &[&["dna"], &["deoxyribonucleic"]],
        answers: &[
            "DNA ennal deoxyribonucleic acid. Jeevante instruction manual aanu, double helix shape. 1953-il Watson-um Crick-um aanu structure kandupidichathu, Rosalind Franklin-nte data vechu. Ninte DNA-yil thanne kuzhappam und myre.",
            "DNA-yil aanu genes okke. A, T, G, C ennu naalu bases. Achanodu chodikk, ninte DNA evidunnu vannathennu, naaye.",
        ],
    },
    Topic {
        key: "photosynthesis",
        triggers: &[&["photosynthesis"]],
        answers: &[
            "Plants sunlight, carbon dioxide, vellam vechu glucose-um oxygen-um undakkunna process aanu photosynthesis. Chlorophyll aanu athinte hero. Nee swasikkunna oxygen avarude daanam aanu myre.",
            "6CO₂ + 6H₂O + light → C₆H₁₂O₆ + 6O₂. Leaf-il nadakkunnu. Oru chedi polum valarthan ariyatha ninakku ithu enthinu, mone?",
        ],
    },
    Topic {
        key: "mount everest",
        triggers: &[&["highest", "mountain"], &["tallest", "mountain"], &["everest"]],
        answers: &[
            "Mount Everest, 8,849 metre. Nepal-China border-il. 1953-il Edmund Hillary-um Tenzing Norgay-um aadyam kayari. Nee stairs kayarumbol thanne kithakkum myre.",
            "Ettavum uyaram ulla mala Mount Everest aanu, 8,849 m. Athinte mukalil ninte ego pole thanne thanuppu aanu, naaye.",
        ],
    },
    Topic {
        key: "nile",
        triggers: &[&["longest", "river"], &["nile"]],
        answers: &[
            "Nile aanu ettavum neelam ulla puzha, ekadesham 6,650 km, Africa-yil koodi ozhukunnu. Amazon-um fight cheyyunnundu, pakshe Nile thanne mone.",
            "Nile, 6,650 km. Egypt-nte jeevan athaanu. Ninte Periyar polum ariyille myre?",
        ],
    },
    Topic {
        key: "pacific ocean",
        triggers: &[&["largest", "ocean"], &["biggest", "ocean"], &["pacific"]],
        answers: &[
            "Pacific Ocean aanu ettavum valiya samudram. Bhoomiyude moonnil onnu bhagam athaanu. Ninte thalayil ulla shoonyatha athilum valuthaanu myre.",
            "Pacific, 165 million square km. Mariana Trench-um athil aanu, 11 km aazham. Chaadi nokkikko naaye.",
        ],
    },
    Topic {
        key: "indian independence",
        triggers: &[&["india", "independence"], &["independence", "day"], &["indian", "independence"], &["swathanthryam"]],
        answers: &[
            "India-kku swathanthryam kittiyathu 15 August 1947-il. Nehru aanu aadya Prime Minister. Ithu ariyathe nee India-kkaran aano myre?",
            "15 August 1947, ardharaathri. \"Tryst with destiny\" speech okke undaayirunnu. School-il urangi irunno mone?",
        ],
    },
    Topic {
        key: "world war 2",
        triggers: &[&["world", "war", "2"], &["world", "war", "ii"], &["ww2"], &["wwii"], &["second", "world", "war"]],
        answers: &[
            "World War 2 nadannathu 1939 muthal 1945 vare. Germany Poland aakramichu thudangi, Japan surrender cheythu theernnu. 70-85 million aalukal marichu. Chumma kalikkaan ulla vishayam alla myre.",
            "1939-1945. Allies-um Axis-um thammil. Hiroshima-Nagasaki atom bomb-um athil aanu. History onnu vaayikk naaye.",
        ],
    },
    Topic {
        key: "pi",
        triggers: &[&["value", "of", "pi"], &["pi", "value"], &["pi"]],
        answers: &[
            "Pi = 3.14159… theerilla, irrational number aanu. Circle-nte circumference divided by diameter. 22/7 ennu paranju nadakkalle myre, athu approximation maathram.",
            "3.14159265… ennu pokum. Circumference = 2πr. Maths class-il nee enthu cheyyuvaayirunnu mone?",
        ],
    },
    Topic {
        key: "internet",
        triggers: &[&["internet"]],
        answers: &[
            "Internet thudangiyathu ARPANET aayi 1969-il, US defence project. TCP/IP 1983-il vannu, Tim Berners-Lee 1989-il World Wide Web undakki. Ninte reels kaanaan vendi alla athu undakkiyathu myre.",
            "1969 ARPANET, 1983 TCP/IP, 1991 WWW public aayi. Ithokke ariyathe aanu nee divasam muzhuvan online, naaye.",
        ],
    },
    Topic {
        key: "first computer",
        triggers: &[&["first", "computer"], &["computer", "invented"], &["father", "of", "computer"]],
        answers: &[
            "Charles Babbage-nte Analytical Engine (1837) aanu aadyathe general-purpose computer design. Electronic aayittu ENIAC, 1945. Ninte phone athilum powerful aanu, pakshe nee athil enthu cheyyunnu myre?",
            "Babbage aanu father of computer. ENIAC 1945-il vannu, oru muri muzhuvan valuppam. Ippo ninte pocket-il, ennittum buddhi illa naaye.",
        ],
    },
    Topic {
        key: "human bones",
        triggers: &[&["bones"], &["bone", "human"], &["asthi"]],
        answers: &[
            "Valiya manushyanu 206 bones und. Kunjungalkku 270-300 vare, pinne chilathu koodi cherum. Ettavum valiya bone femur. Ninte naakkinu bone illa, athaanu ithra samsaaram myre.",
            "206 bones, mone. Ettavum cheriyathu chevikkullile stapes. Ellu odiyathe nokkikko.",
        ],
    },
    Topic {
        key: "blood circulation",
        triggers: &[&["blood"], &["circulation"], &["heart", "pump"], &["raktham"]],
        answers: &[
            "Heart aanu blood pump cheyyunnathu, divasam 1 lakh-il adhikam thavana midikkum. Arteries oxygen ulla blood kondupokum, veins thirichu kondu varum. William Harvey aanu 1628-il ithu explain cheythathu. Ninte BP koottalle myre.",
            "Oru adult-nte body-il ekadesham 5 litre blood und. Full circulation-nu oru minute polum venda. Chora thilakkunnu alle, naaye?",
        ],
    },
    Topic {
        key: "shakespeare",
        triggers: &[&["shakespeare"]],
        answers: &[
            "William Shakespeare, English playwright, 1564-1616. Hamlet, Macbeth, Romeo and Juliet okke pulli ezhuthiyathaanu. Ninte WhatsApp status alla literature myre.",
            "Shakespeare 37-olam plays-um 154 sonnets-um ezhuthi. \"To be or not to be\". Ninakku \"to study or not to study\" aanu problem, alle naaye?",
        ],
    },
    Topic {
        key: "cricket world cup",
        triggers: &[&["cricket", "world", "cup"], &["cricket", "worldcup"]],
        answers: &[
            "2023 ODI Cricket World Cup Australia aanu jayichathu, final-il India-ye tholppichu. 2024 T20 World Cup India eduthu. Ithokke ariyathe cricket parayalle myre.",
            "ODI World Cup 2023: Australia. T20 World Cup 2024: India. India 1983-lum 2011-lum ODI cup eduthu. Kapil Dev-ne ariyumo mone?",
        ],
    },
    Topic {
        key: "football world cup",
        triggers: &[&["fifa"], &["football", "world", "cup"], &["football", "worldcup"]],
        answers: &[
            "FIFA World Cup 2022 Argentina jayichu, Qatar-il, France-ne penalty-il tholppichu. Messi-kku cup kitti. Ninte team eppo jayikkum myre?",
            "FIFA World Cup naalu varsham koodumbol nadakkunnu. Brazil 5 thavana eduthu, ettavum kooduthal. 2022-il Argentina. Panthu thattaan ariyumo naaye?",
        ],
    },
    Topic {
        key: "richest person",
        triggers: &[&["richest"], &["most", "rich"], &["wealthiest"]],
        answers: &[
            "Ippo mikkavaarum Elon Musk aanu lokathile ettavum valiya panakkaran, Tesla-yum SpaceX-um. List divasavum maarum, ninte account balance maathram maarilla myre.",
            "Forbes list-il mukalil Elon Musk. Jeff Bezos, Bernard Arnault okke pinnale. Nee ippozhum UPI-il 10 roopa kadam chodikkunnu, naaye.",
        ],
    },
    Topic {
        key: "covid",
        triggers: &[&["covid"], &["corona"], &["coronavirus"], &["covid19"]],
        answers: &[
            "COVID-19 SARS-CoV-2 virus undakkunna rogam aanu. 2019 avasaanam Wuhan-il thudangi, 2020-il pandemic aayi. Mask okke marannu poyo myre?",
            "COVID-19: respiratory disease, 2020 March-il WHO pandemic aayi declare cheythu. Lockdown-il nee enthu padichu, onnum illa alle naaye?",
        ],
    },
];

/// Nouns answered by the "how many" form.
pub const COUNTS: &[Topic] = &[
    Topic {
        key: "us states",
        triggers: &[&["states", "usa"], &["states", "america"]],
        answers: &["America-yil 50 states und myre. Washington DC state alla, district aanu."],
    },
    Topic {
        key: "indian states",
        triggers: &[&["states"]],
        answers: &[
            "India-yil 28 states-um 8 union territories-um und. Kerala athil ettavum mikachathu, athu ninakku ariyaam alle myre?",
            "28 states, 8 union territories. Ithu polum ariyathe aano nee vote cheyyunnathu, naaye?",
        ],
    },
    Topic {
        key: "continents",
        triggers: &[&["continents"], &["continent"]],
        answers: &[
            "7 continents: Asia, Africa, North America, South America, Antarctica, Europe, Australia. Ennan padikk myre.",
            "Ezhu (7) continents und mone. Ettavum valuthu Asia, ettavum cheruthu Australia.",
        ],
    },
    Topic {
        key: "planets",
        triggers: &[&["planets"], &["planet"]],
        answers: &["8 planets, myre. Pluto ippo dwarf planet aanu, 2006 muthal."],
    },
    Topic {
        key: "kerala districts",
        triggers: &[&["districts", "kerala"], &["jillakal"]],
        answers: &["Kerala-yil 14 districts und, Kasaragod muthal Thiruvananthapuram vare. Swantham naadu polum ariyille naaye?"],
    },
    Topic {
        key: "oceans",
        triggers: &[&["oceans"]],
        answers: &["5 oceans: Pacific, Atlantic, Indian, Southern, Arctic. Ithu ariyaathe kadalil chaadalle myre."],
    },
    Topic {
        key: "countries",
        triggers: &[&["countries"], &["nations"]],
        answers: &["Lokathil 195 countries und: 193 UN members, pinne Vatican-um Palestine-um observers aayi. Ninakku onnil polum visa kittilla myre."],
    },
];

/// Events answered by the "when did" form.
pub const EVENTS: &[Topic] = &[
    Topic {
        key: "world war 1",
        triggers: &[&["world", "war", "1"], &["world", "war", "i"], &["first", "world", "war"], &["ww1"], &["wwi"]],
        answers: &["World War 1: 1914 muthal 1918 vare. Archduke Franz Ferdinand-ne vedi vechathu aanu thudakkam. History vaayikk myre."],
    },
    Topic {
        key: "indian republic",
        triggers: &[&["republic"], &["constitution"]],
        answers: &["26 January 1950-il India republic aayi, constitution nilavil vannu. Athaanu Republic Day, mone."],
    },
    Topic {
        key: "kerala formation",
        triggers: &[&["kerala", "formed"], &["kerala", "form"], &["kerala", "piravi"], &["keralappiravi"]],
        answers: &["1 November 1956-il Kerala undaayi, athaanu Keralappiravi. Swantham naadinte birthday ariyille naaye?"],
    },
    Topic {
        key: "french revolution",
        triggers: &[&["french", "revolution"]],
        answers: &["French Revolution 1789-il thudangi, Bastille veezhchayodu. 1799 vare neendu. Ninte revolution bed-il ninnu ezhunnelkkal aanu myre."],
    },
];

/// The first topic in `table` that matches `query`.
pub fn lookup<'t>(table: &'t [Topic], query: &Query) -> Option<&'t Topic> {
    table.iter().find(|t| t.matches(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(msg: &str) -> Option<&'static str> {
        lookup(TOPICS, &Query::new(msg)).map(|t| t.key)
    }

    #[test]
    fn question_forms_map_to_topics() {
        assert_eq!(topic("What is the sun?"), Some("sun"));
        assert_eq!(topic("What is photosynthesis?"), Some("photosynthesis"));
        assert_eq!(topic("What is DNA?"), Some("dna"));
        assert_eq!(topic("What is the highest mountain?"), Some("mount everest"));
        assert_eq!(topic("When did World War 2 happen?"), Some("world war 2"));
        assert_eq!(topic("When did India get independence?"), Some("indian independence"));
        assert_eq!(topic("Who won the Cricket World Cup?"), Some("cricket world cup"));
        assert_eq!(topic("What is FIFA World Cup?"), Some("football world cup"));
        assert_eq!(topic("How many bones in human body?"), Some("human bones"));
        assert_eq!(topic("When was the internet invented?"), Some("internet"));
    }

    #[test]
    fn specific_topics_shadow_broad_ones() {
        assert_eq!(topic("who did the first moon landing"), Some("moon landing"));
        assert_eq!(topic("how big is the moon"), Some("moon"));
    }

    #[test]
    fn counts_prefer_us_states_when_named() {
        assert_eq!(lookup(COUNTS, &Query::new("how many states in usa")).map(|t| t.key), Some("us states"));
        assert_eq!(lookup(COUNTS, &Query::new("How many states in India?")).map(|t| t.key), Some("indian states"));
    }

    #[test]
    fn every_topic_has_answers() {
        for t in TOPICS.iter().chain(COUNTS).chain(EVENTS) {
            assert!(!t.answers.is_empty(), "{} has no answers", t.key);
            assert!(!t.triggers.is_empty(), "{} has no triggers", t.key);
        }
    }
}
