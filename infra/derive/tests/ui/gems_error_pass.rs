use gems_derive::gems_error;
use std::borrow::Cow;

#[gems_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("reading fixture")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "io");
    assert_eq!(err.to_string(), "IO error (reading fixture): disk");

    let err = DemoError::NotFound { message: "word".into(), context: None };
    assert_eq!(err.kind(), "not_found");

    let err: DemoError = "boom".into();
    assert_eq!(err.kind(), "internal");
    assert_eq!(err.to_string(), "Internal error: boom");
}
