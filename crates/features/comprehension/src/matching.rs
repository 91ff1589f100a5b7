//! Tolerant answer checking.
//!
//! A single-part answer is accepted when any strategy agrees, from exact to fuzzy:
//! simple, aggressive, alphanumeric-only, word-by-word, small edit distance, and finally
//! 70% of the key words present. Answer keys with several parts (`"a bed, a TV and a sofa"`)
//! need every part matched by some part of the student's answer.

use crate::normalize::{
    aggressive, canonical_word, core_words, levenshtein, light, overlaps, required, simple, split_parts,
    ultra, words_longer_than,
};
use crate::task::AnswerText;
use tracing::trace;

const PART_SEPARATORS: &[&str] = &["and"];
const CREDIT_SEPARATORS: &[&str] = &["and", "or"];

/// `true` when `given` is an acceptable answer to `correct`. For a list of accepted answers,
/// matching any one of them is enough.
#[must_use]
pub fn check_answer(given: &AnswerText, correct: &AnswerText) -> bool {
    let user = given.entries();
    if user.is_empty() {
        return false;
    }
    correct.entries().into_iter().any(|key| check_against(&user, key))
}

fn check_against(user: &[&str], key: &str) -> bool {
    let key_parts = split_parts(key, PART_SEPARATORS);
    if key_parts.len() <= 1 {
        return user.iter().enumerate().any(|(index, text)| {
            let matched = single_match(text, key);
            if let Some(strategy) = matched {
                trace!(strategy, answer = index, "Answer accepted");
            }
            matched.is_some()
        });
    }

    let user_parts: Vec<String> = user.iter().flat_map(|text| split_parts(text, PART_SEPARATORS)).collect();
    if user_parts.len() < key_parts.len() {
        return false;
    }
    key_parts.iter().all(|key_part| user_parts.iter().any(|user_part| part_match(user_part, key_part)))
}

/// Name of the first strategy accepting `user` for `key`.
fn single_match(user: &str, key: &str) -> Option<&'static str> {
    if simple(user) == simple(key) {
        return Some("simple");
    }
    let (user_aggressive, key_aggressive) = (aggressive(user), aggressive(key));
    if user_aggressive == key_aggressive {
        return Some("aggressive");
    }
    if ultra(user) == ultra(key) {
        return Some("alphanumeric");
    }
    if user.to_lowercase().split_whitespace().eq(key.to_lowercase().split_whitespace()) {
        return Some("word-by-word");
    }
    if within_typo_distance(&user_aggressive, &key_aggressive) {
        return Some("edit-distance");
    }
    if key.chars().count() > 5 && key_words_present(user, key) {
        return Some("key-words");
    }
    None
}

fn within_typo_distance(user: &str, key: &str) -> bool {
    let (user_len, key_len) = (user.chars().count(), key.chars().count());
    if user_len.abs_diff(key_len) > 2 {
        return false;
    }
    let allowed = (user_len.max(key_len) / 10).max(1);
    levenshtein(user, key) <= allowed
}

fn key_words_present(user: &str, key: &str) -> bool {
    let key_words = words_longer_than(key, 2);
    if key_words.is_empty() {
        return false;
    }
    let user_words = words_longer_than(user, 2);
    let matched = key_words.iter().filter(|word| user_words.iter().any(|u| overlaps(u, word))).count();
    matched >= required(key_words.len(), 0.7)
}

fn part_match(user: &str, key: &str) -> bool {
    if simple(user) == simple(key) || aggressive(user) == aggressive(key) {
        return true;
    }

    let user_core = core_words(user);
    let key_core = core_words(key);
    if !user_core.is_empty()
        && !key_core.is_empty()
        && key_core.iter().all(|word| user_core.iter().any(|u| overlaps(u, word)))
    {
        return true;
    }

    if key.chars().count() <= 3 {
        return false;
    }
    let key_words = words_longer_than(key, 1);
    if key_words.is_empty() {
        return false;
    }
    let user_words: Vec<String> = words_longer_than(user, 1).iter().map(|w| canonical_word(w)).collect();
    let matched = key_words
        .iter()
        .map(|word| canonical_word(word))
        .filter(|word| user_words.iter().any(|u| overlaps(u, word)))
        .count();
    matched >= required(key_words.len(), 0.6)
}

/// Exact check for picked options: case, accents and punctuation are ignored, nothing else.
#[must_use]
pub fn check_choice(given: &AnswerText, correct: &AnswerText) -> bool {
    let keys: Vec<String> = correct.entries().into_iter().map(aggressive).collect();
    given.entries().into_iter().any(|entry| keys.contains(&aggressive(entry)))
}

/// Points for an answer: full points when [`check_answer`] accepts it, otherwise for
/// multi-point questions a share proportional to the answer-key parts found.
#[must_use]
pub fn award_points(given: &AnswerText, correct: &AnswerText, points: u32) -> u32 {
    if check_answer(given, correct) {
        return points;
    }
    if points <= 1 {
        return 0;
    }

    let user: Vec<String> = match given {
        AnswerText::Many(_) => given.entries().into_iter().map(light).collect(),
        AnswerText::One(text) => split_parts(text, CREDIT_SEPARATORS).iter().map(|p| light(p)).collect(),
    };
    let key: Vec<String> = match correct {
        AnswerText::Many(_) => correct.entries().into_iter().map(light).collect(),
        AnswerText::One(text) => split_parts(text, CREDIT_SEPARATORS).iter().map(|p| light(p)).collect(),
    };
    if key.len() <= 1 || user.is_empty() {
        return 0;
    }

    let matched = key.iter().filter(|part| user.iter().any(|u| credit_match(u, part))).count();
    (matched as f64 / key.len() as f64 * f64::from(points)).round() as u32
}

fn credit_match(user: &str, key: &str) -> bool {
    if user == key {
        return true;
    }
    if key.chars().count() <= 3 || user.chars().count() <= 3 {
        return false;
    }
    let key_words: Vec<&str> = key.split(' ').filter(|w| w.chars().count() > 2).collect();
    if key_words.is_empty() {
        return false;
    }
    let user_words: Vec<&str> = user.split(' ').collect();
    let matched = key_words.iter().filter(|word| user_words.iter().any(|u| overlaps(u, word))).count();
    matched >= required(key_words.len(), 0.7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(given: &str, correct: &str) -> bool {
        check_answer(&given.into(), &correct.into())
    }

    #[test]
    fn each_strategy_accepts() {
        assert!(accepts("  MADRID ", "madrid"));
        assert!(accepts("esta aqui", "Está aquí."));
        assert!(accepts("café-bar", "cafe bar"));
        assert!(accepts("the  big   house", "The big house"));
        assert!(accepts("beautifull", "beautiful"));
        assert!(accepts("she went to the cinema yesterday", "went to the cinema"));
    }

    #[test]
    fn rejects_wrong_answers() {
        assert!(!accepts("London", "Madrid"));
        assert!(!accepts("", "Madrid"));
        assert!(!accepts("cat", "dog"));
        assert!(!accepts("true", "false"));
    }

    #[test]
    fn typo_allowance_scales_with_length() {
        assert!(accepts("perro", "pero"));
        assert!(!accepts("perro", "pera"));
        assert!(accepts("internationalisation", "internationalizaton"));
        assert!(!accepts("gato", "pollo"));
    }

    #[test]
    fn multi_part_with_synonyms_and_plurals() {
        assert!(accepts("a couch, a television and beds", "a sofa, a TV and a bed"));
        assert!(accepts("fridge and loo", "refrigerator and toilet"));
        assert!(!accepts("a couch", "a sofa, a TV and a bed"));
        assert!(!accepts("a lamp, a chair and a rug", "a sofa, a TV and a bed"));
    }

    #[test]
    fn list_answer_keys_accept_any_entry() {
        let correct = AnswerText::from(vec!["football", "soccer"]);
        assert!(check_answer(&"Soccer".into(), &correct));
        assert!(!check_answer(&"tennis".into(), &correct));
    }

    #[test]
    fn choices_need_the_exact_option() {
        assert!(check_choice(&" B ".into(), &"b".into()));
        assert!(check_choice(&"Vrai".into(), &AnswerText::from(vec!["vrai", "true"])));
        assert!(!check_choice(&"a".into(), &"b".into()));
        assert!(!check_choice(&"".into(), &"b".into()));
    }

    #[test]
    fn partial_credit_for_multi_point_questions() {
        let correct: AnswerText = "swimming, tennis and running".into();
        assert_eq!(award_points(&"tennis or golf".into(), &correct, 3), 1);
        assert_eq!(award_points(&AnswerText::from(vec!["swimming", "tennis"]), &correct, 3), 2);
        assert_eq!(award_points(&"swimming, tennis and running".into(), &correct, 3), 3);
        assert_eq!(award_points(&"golf".into(), &correct, 1), 0);
    }
}
