use gems_domain::language::{Difficulty, Language, Skill, Tier};
use std::str::FromStr;

#[test]
fn language_accepts_names_and_codes() {
    assert_eq!(Language::from_str("Spanish").unwrap(), Language::Spanish);
    assert_eq!(Language::from_str("fr").unwrap(), Language::French);
    assert_eq!(Language::German.to_string(), "german");
    assert_eq!(Language::Portuguese.code(), "pt");

    let parsed: Language = serde_json::from_str(r#""de""#).unwrap();
    assert_eq!(parsed, Language::German);
    assert_eq!(serde_json::to_string(&Language::Spanish).unwrap(), r#""spanish""#);
}

#[test]
fn accented_keyboard_letters() {
    assert!(Language::Spanish.accented_letters().contains(&'ñ'));
    assert!(Language::German.accented_letters().contains(&'ß'));
    assert!(Language::English.accented_letters().is_empty());
}

#[test]
fn exam_enums_use_lowercase_wire_names() {
    assert_eq!(serde_json::to_string(&Tier::Higher).unwrap(), r#""higher""#);
    assert_eq!(serde_json::from_str::<Skill>(r#""listening""#).unwrap(), Skill::Listening);
    assert!(Difficulty::Beginner < Difficulty::Expert);
}
