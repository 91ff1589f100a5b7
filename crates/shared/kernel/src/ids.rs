use std::borrow::Cow;

/// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Length of ids produced by `safe_nanoid!()`.
pub const SAFE_ID_LEN: usize = 12;

#[gems_derive::gems_error]
pub enum IdError {
    #[error("Malformed id{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Checks that a client-supplied session id could have come from `safe_nanoid!()`.
///
/// # Errors
/// Returns [`IdError::Malformed`] for wrong length or characters outside [`SAFE_ALPHABET`].
pub fn verify_session_id(id: &str) -> Result<&str, IdError> {
    if id.chars().count() != SAFE_ID_LEN {
        return Err(IdError::Malformed {
            message: format!("expected {SAFE_ID_LEN} characters, got {}", id.chars().count()).into(),
            context: None,
        });
    }
    if let Some(bad) = id.chars().find(|c| !SAFE_ALPHABET.contains(c)) {
        return Err(IdError::Malformed {
            message: format!("unexpected character '{bad}'").into(),
            context: None,
        });
    }
    Ok(id)
}
