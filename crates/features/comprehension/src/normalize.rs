//! Normal forms and word-level helpers used by answer matching.

use gems_kernel::text::{collapse_whitespace, fold_case, strip_diacritics};

const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', '(', ')'];

const ARTICLES: &[&str] = &["a", "an", "the"];

const COMMON_ADJECTIVES: &[&str] = &[
    "small", "big", "large", "comfortable", "beautiful", "nice", "good", "bad", "old", "new", "young",
    "great", "wonderful", "amazing", "excellent",
];

const SYNONYMS: &[(&str, &str)] = &[
    ("tv", "television"),
    ("telly", "television"),
    ("fridge", "refrigerator"),
    ("sofa", "couch"),
    ("settee", "couch"),
    ("loo", "toilet"),
    ("washroom", "bathroom"),
    ("restroom", "bathroom"),
];

/// Lowercase and trim.
#[must_use]
pub fn simple(text: &str) -> String {
    fold_case(text)
}

/// Lowercase, no accents, no punctuation, single spaces.
#[must_use]
pub fn aggressive(text: &str) -> String {
    let stripped: String = strip_diacritics(&text.to_lowercase())
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .map(|c| if c == '\u{200B}' { ' ' } else { c })
        .collect();
    collapse_whitespace(&stripped)
}

/// Letters and digits only: `"Le café-bar!"` becomes `"lecafebar"`.
#[must_use]
pub fn ultra(text: &str) -> String {
    strip_diacritics(&text.to_lowercase()).chars().filter(|c| c.is_alphanumeric() || *c == '_').collect()
}

/// Lowercase, trimmed, no punctuation, single spaces; accents are kept.
#[must_use]
pub fn light(text: &str) -> String {
    let stripped: String = text.to_lowercase().chars().filter(|c| !PUNCTUATION.contains(c)).collect();
    collapse_whitespace(&stripped)
}

/// Edit distance over characters.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            current[j + 1] = (previous[j + 1] + 1).min(current[j] + 1).min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Splits on `,` and `;` and on the standalone words given in `conjunctions`.
/// Parts come back trimmed with single spaces; empty parts are dropped.
#[must_use]
pub fn split_parts(text: &str, conjunctions: &[&str]) -> Vec<String> {
    let mut parts = Vec::new();
    for piece in text.split([',', ';']) {
        let mut words: Vec<&str> = Vec::new();
        for word in piece.split_whitespace() {
            if conjunctions.iter().any(|c| word.eq_ignore_ascii_case(c)) {
                push_part(&mut parts, &words);
                words.clear();
            } else {
                words.push(word);
            }
        }
        push_part(&mut parts, &words);
    }
    parts
}

fn push_part(parts: &mut Vec<String>, words: &[&str]) {
    if !words.is_empty() {
        parts.push(words.join(" "));
    }
}

/// Singular, synonym-resolved form of a word: `"sofas"` becomes `"couch"`.
#[must_use]
pub fn canonical_word(word: &str) -> String {
    let word = word.to_lowercase();
    let singular = match word.strip_suffix('s') {
        Some(stem) if word.chars().count() > 3 => stem,
        _ => word.as_str(),
    };
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == singular)
        .map_or_else(|| singular.to_owned(), |(_, to)| (*to).to_owned())
}

/// Meaningful words of a phrase: articles and common adjectives removed, canonicalised.
#[must_use]
pub fn core_words(text: &str) -> Vec<String> {
    aggressive(text)
        .split(' ')
        .filter(|word| word.chars().count() > 1)
        .filter(|word| !COMMON_ADJECTIVES.contains(word) && !ARTICLES.contains(word))
        .map(canonical_word)
        .collect()
}

/// Words of the aggressive form longer than `min_len` characters.
#[must_use]
pub fn words_longer_than(text: &str, min_len: usize) -> Vec<String> {
    aggressive(text)
        .split(' ')
        .filter(|word| word.chars().count() > min_len)
        .map(str::to_owned)
        .collect()
}

/// Equal, or one contains the other.
#[must_use]
pub fn overlaps(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}

/// `ceil(len * ratio)`.
#[must_use]
pub fn required(len: usize, ratio: f64) -> usize {
    (len as f64 * ratio).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_forms() {
        assert_eq!(simple("  The Cat "), "the cat");
        assert_eq!(aggressive(" ¡Él está  aquí! (sí) "), "¡el esta aqui si");
        assert_eq!(aggressive("a\u{00A0}b\u{200B}c"), "a b c");
        assert_eq!(ultra("Le café-bar!"), "lecafebar");
        assert_eq!(light("Él, está."), "él está");
    }

    #[test]
    fn levenshtein_distances() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("perro", "pero"), 1);
        assert_eq!(levenshtein("niño", "nino"), 1);
    }

    #[test]
    fn splitting() {
        assert_eq!(split_parts("a bed, a TV and a sofa", &["and"]), ["a bed", "a TV", "a sofa"]);
        assert_eq!(split_parts("cats; dogs", &["and"]), ["cats", "dogs"]);
        assert_eq!(split_parts("tea or coffee", &["and", "or"]), ["tea", "coffee"]);
        assert_eq!(split_parts("sand and stone", &["and"]), ["sand", "stone"]);
        assert!(split_parts(" , ; ", &["and"]).is_empty());
    }

    #[test]
    fn canonical_words() {
        assert_eq!(canonical_word("TV"), "television");
        assert_eq!(canonical_word("sofas"), "couch");
        assert_eq!(canonical_word("telly"), "television");
        assert_eq!(canonical_word("bus"), "bus");
        assert_eq!(core_words("a big comfortable sofa"), ["couch"]);
    }
}
