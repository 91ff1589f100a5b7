use gems_derive::api_model;

#[api_model]
pub struct GuessRequest {
    pub guess_word: String,
}

#[api_model(rename_all = "kebab-case")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    OpenResponse,
}

fn main() {
    let req: GuessRequest = serde_json::from_str(r#"{"guessWord":"perro"}"#).unwrap();
    assert_eq!(req.guess_word, "perro");
    assert!(serde_json::from_str::<GuessRequest>(r#"{"guessWord":"x","extra":1}"#).is_err());

    let kind: QuestionKind = serde_json::from_str(r#""multiple-choice""#).unwrap();
    assert_eq!(kind, QuestionKind::MultipleChoice);
    assert_eq!(serde_json::to_string(&QuestionKind::OpenResponse).unwrap(), r#""open-response""#);
}
