//! Built-in word banks, used when a game is started without vocabulary.

use gems_domain::language::{Difficulty, Language};
use gems_domain::vocabulary::VocabularyItem;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Beginner, intermediate and advanced words of one category.
type Tiered = [&'static [&'static str]; 3];

const FALLBACK_CATEGORY: &str = "animals";

const ENGLISH: &[(&str, Tiered)] = &[
    ("animals", [
        &["cat", "dog", "bird", "fish", "lion"],
        &["tiger", "horse", "sheep", "whale", "panda"],
        &["elephant", "giraffe", "penguin", "dolphin", "squirrel"],
    ]),
    ("food", [
        &["rice", "meat", "fish", "milk", "cake"],
        &["bread", "pasta", "apple", "steak", "sugar"],
        &["yogurt", "banana", "potato", "tomato", "chicken"],
    ]),
    ("colors", [
        &["red", "blue", "gray", "pink", "gold"],
        &["green", "black", "white", "brown", "purple"],
        &["yellow", "orange", "violet", "indigo", "maroon"],
    ]),
    ("numbers", [
        &["one", "two", "five", "nine", "zero"],
        &["three", "seven", "eight", "forty", "sixty"],
        &["eleven", "twelve", "thirty", "ninety", "fifteen"],
    ]),
    ("family", [
        &["mom", "dad", "son", "aunt", "wife"],
        &["father", "mother", "sister", "cousin", "nephew"],
        &["brother", "daughter", "grandma", "grandpa", "husband"],
    ]),
];

const SPANISH: &[(&str, Tiered)] = &[
    ("animals", [
        &["gato", "perro", "pato", "vaca", "rana"],
        &["cabra", "cerdo", "tigre", "lobo", "zorro"],
        &["elefante", "ballena", "jirafa", "cocodrilo", "mariposa"],
    ]),
    ("food", [
        &["pan", "arroz", "leche", "agua", "sopa"],
        &["huevo", "carne", "fruta", "pollo", "queso"],
        &["naranja", "tomate", "cebolla", "lechuga", "plátano"],
    ]),
    ("colors", [
        &["rojo", "azul", "gris", "rosa", "oro"],
        &["verde", "negro", "blanco", "marrón", "morado"],
        &["amarillo", "naranja", "violeta", "índigo", "marrón"],
    ]),
    ("numbers", [
        &["uno", "dos", "tres", "cinco", "cero"],
        &["cuatro", "siete", "ocho", "diez", "veinte"],
        &["quince", "treinta", "catorce", "noventa", "sesenta"],
    ]),
];

const FRENCH: &[(&str, Tiered)] = &[
    ("animals", [
        &["chat", "chien", "vache", "loup", "lion"],
        &["tigre", "poule", "mouton", "ours", "singe"],
        &["éléphant", "girafe", "crocodile", "dauphin", "papillon"],
    ]),
    ("food", [
        &["pain", "lait", "eau", "vin", "sel"],
        &["viande", "poulet", "pomme", "sucre", "beurre"],
        &["fromage", "poisson", "tomate", "banane", "orange"],
    ]),
];

const GERMAN: &[(&str, Tiered)] = &[
    ("animals", [
        &["hund", "katze", "maus", "kuh", "pferd"],
        &["vogel", "tiger", "wolf", "schaf", "hase"],
        &["elefant", "giraffe", "krokodil", "delphin", "pinguin"],
    ]),
    ("food", [
        &["brot", "milch", "salz", "wein", "eis"],
        &["käse", "wurst", "apfel", "fleisch", "suppe"],
        &["tomate", "banane", "orange", "gemüse", "zwiebel"],
    ]),
];

const fn bank(language: Language) -> &'static [(&'static str, Tiered)] {
    match language {
        Language::Spanish => SPANISH,
        Language::French => FRENCH,
        Language::German => GERMAN,
        Language::English | Language::Portuguese => ENGLISH,
    }
}

fn find(bank: &'static [(&'static str, Tiered)], category: &str) -> Option<&'static Tiered> {
    bank.iter().find(|(name, _)| name.eq_ignore_ascii_case(category)).map(|(_, words)| words)
}

/// Built-in words for a language, category and level.
///
/// A category the language lacks falls back to the English one, and an unknown category to
/// English animals. `Expert` draws from the advanced words.
#[must_use]
pub fn builtin_words(language: Language, category: &str, difficulty: Difficulty) -> &'static [&'static str] {
    let tiers = find(bank(language), category)
        .or_else(|| find(ENGLISH, category))
        .or_else(|| find(ENGLISH, FALLBACK_CATEGORY))
        .unwrap_or(&ENGLISH[0].1);
    let tier = match difficulty {
        Difficulty::Beginner => 0,
        Difficulty::Intermediate => 1,
        Difficulty::Advanced | Difficulty::Expert => 2,
    };
    tiers[tier]
}

/// Where the secret word of a new game comes from, in order of preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSource<'a> {
    pub custom_words: &'a [String],
    pub vocabulary: &'a [VocabularyItem],
    pub language: Language,
    pub category: Option<&'a str>,
    pub difficulty: Difficulty,
}

impl WordSource<'_> {
    /// A word for Word Guesser: a random custom word, else a random single-word vocabulary term,
    /// else a built-in word.
    #[must_use]
    pub fn pick_word(&self, rng: &mut impl Rng) -> String {
        self.pick_with(rng, VocabularyItem::is_single_word)
    }

    /// A word or phrase for Hangman. Any vocabulary term with a letter to guess qualifies.
    #[must_use]
    pub fn pick_phrase(&self, rng: &mut impl Rng) -> String {
        self.pick_with(rng, |item| item.term.chars().any(char::is_alphabetic))
    }

    fn pick_with(&self, rng: &mut impl Rng, usable: impl Fn(&VocabularyItem) -> bool) -> String {
        let custom: Vec<&str> =
            self.custom_words.iter().map(|w| w.trim()).filter(|w| !w.is_empty()).collect();
        if let Some(word) = custom.choose(rng) {
            return (*word).to_owned();
        }

        let terms: Vec<&str> =
            self.vocabulary.iter().filter(|item| usable(item)).map(|item| item.term.trim()).collect();
        if let Some(word) = terms.choose(rng) {
            return (*word).to_owned();
        }

        let words = builtin_words(self.language, self.category.unwrap_or(FALLBACK_CATEGORY), self.difficulty);
        words.choose(rng).map_or_else(|| FALLBACK_CATEGORY.to_owned(), |w| (*w).to_owned())
    }
}

/// Built-in evidence for Detective Listening: `(word, English meaning)`.
#[must_use]
pub fn builtin_evidence(language: Language, case: &str) -> &'static [(&'static str, &'static str)] {
    match (language, case) {
        (Language::Spanish, "animals") => &[
            ("perro", "dog"),
            ("gato", "cat"),
            ("pájaro", "bird"),
            ("pez", "fish"),
            ("caballo", "horse"),
            ("vaca", "cow"),
            ("cerdo", "pig"),
            ("oveja", "sheep"),
            ("conejo", "rabbit"),
            ("ratón", "mouse"),
            ("elefante", "elephant"),
            ("león", "lion"),
            ("tigre", "tiger"),
            ("oso", "bear"),
            ("lobo", "wolf"),
        ],
        (Language::French, "animals") => &[
            ("chien", "dog"),
            ("chat", "cat"),
            ("oiseau", "bird"),
            ("poisson", "fish"),
            ("cheval", "horse"),
            ("vache", "cow"),
            ("cochon", "pig"),
            ("mouton", "sheep"),
            ("lapin", "rabbit"),
            ("souris", "mouse"),
            ("éléphant", "elephant"),
            ("lion", "lion"),
            ("tigre", "tiger"),
            ("ours", "bear"),
            ("loup", "wolf"),
        ],
        (Language::German, "animals") => &[
            ("Hund", "dog"),
            ("Katze", "cat"),
            ("Vogel", "bird"),
            ("Fisch", "fish"),
            ("Pferd", "horse"),
            ("Kuh", "cow"),
            ("Schwein", "pig"),
            ("Schaf", "sheep"),
            ("Hase", "rabbit"),
            ("Maus", "mouse"),
            ("Elefant", "elephant"),
            ("Löwe", "lion"),
            ("Tiger", "tiger"),
            ("Bär", "bear"),
            ("Wolf", "wolf"),
        ],
        (Language::Spanish, "family") => &[
            ("padre", "father"),
            ("madre", "mother"),
            ("hermano", "brother"),
            ("hermana", "sister"),
            ("abuelo", "grandfather"),
            ("abuela", "grandmother"),
            ("tío", "uncle"),
            ("tía", "aunt"),
            ("primo", "cousin"),
            ("hijo", "son"),
        ],
        (Language::French, "family") => &[
            ("père", "father"),
            ("mère", "mother"),
            ("frère", "brother"),
            ("sœur", "sister"),
            ("grand-père", "grandfather"),
            ("grand-mère", "grandmother"),
            ("oncle", "uncle"),
            ("tante", "aunt"),
            ("cousin", "cousin"),
            ("fils", "son"),
        ],
        (Language::German, "family") => &[
            ("Vater", "father"),
            ("Mutter", "mother"),
            ("Bruder", "brother"),
            ("Schwester", "sister"),
            ("Großvater", "grandfather"),
            ("Großmutter", "grandmother"),
            ("Onkel", "uncle"),
            ("Tante", "aunt"),
            ("Cousin", "cousin"),
            ("Sohn", "son"),
        ],
        (Language::Spanish, "colors") => &[
            ("rojo", "red"),
            ("azul", "blue"),
            ("verde", "green"),
            ("amarillo", "yellow"),
            ("negro", "black"),
            ("blanco", "white"),
            ("morado", "purple"),
            ("rosa", "pink"),
            ("naranja", "orange"),
            ("gris", "gray"),
        ],
        (Language::French, "colors") => &[
            ("rouge", "red"),
            ("bleu", "blue"),
            ("vert", "green"),
            ("jaune", "yellow"),
            ("noir", "black"),
            ("blanc", "white"),
            ("violet", "purple"),
            ("rose", "pink"),
            ("orange", "orange"),
            ("gris", "gray"),
        ],
        (Language::German, "colors") => &[
            ("rot", "red"),
            ("blau", "blue"),
            ("grün", "green"),
            ("gelb", "yellow"),
            ("schwarz", "black"),
            ("weiß", "white"),
            ("lila", "purple"),
            ("rosa", "pink"),
            ("orange", "orange"),
            ("grau", "gray"),
        ],
        (Language::Spanish, "food") => &[
            ("manzana", "apple"),
            ("naranja", "orange"),
            ("plátano", "banana"),
            ("pan", "bread"),
            ("leche", "milk"),
        ],
        (Language::French, "food") => &[
            ("pomme", "apple"),
            ("orange", "orange"),
            ("banane", "banana"),
            ("pain", "bread"),
            ("lait", "milk"),
        ],
        (Language::German, "food") => &[
            ("apfel", "apple"),
            ("orange", "orange"),
            ("banane", "banana"),
            ("brot", "bread"),
            ("milch", "milk"),
        ],
        _ => &[],
    }
}
