pub mod email;
pub mod error;

pub use error::ValidationError;

use serde_json::Value;

use crate::types::ValidatedSubmission;

pub const MIN_NAME_CHARS: usize = 1;
pub const MAX_NAME_CHARS: usize = 100;
pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Fields every submission must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Substrings that mark a message as spam. Matched case-insensitively with no
/// word boundaries, so "cryptography" is rejected along with "crypto".
pub const SPAM_INDICATORS: [&str; 5] = ["viagra", "casino", "loan", "bitcoin", "crypto"];

/// Validate an untrusted request body and normalize it.
///
/// Rules run in a fixed order and the first violation is returned:
/// presence, name length, email shape, message length, spam. Lengths are
/// counted in characters after trimming.
pub fn validate(input: &Value) -> Result<ValidatedSubmission, ValidationError> {
    let [name, email, message] = REQUIRED_FIELDS.map(|field| required_field(input, field));
    let (name, email, message) = (name?, email?, message?);

    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&name.chars().count()) {
        return Err(ValidationError::NameLength);
    }

    if !email::is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !(MIN_MESSAGE_CHARS..=MAX_MESSAGE_CHARS).contains(&message.chars().count()) {
        return Err(ValidationError::MessageLength);
    }

    if is_spam(message) {
        return Err(ValidationError::Spam);
    }

    Ok(ValidatedSubmission {
        name: name.to_string(),
        email: email.to_lowercase(),
        message: message.to_string(),
    })
}

pub fn is_spam(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SPAM_INDICATORS.iter().any(|indicator| lowered.contains(indicator))
}

/// Trimmed string content of `field`. Absent, null, non-string and blank
/// values all count as missing.
fn required_field<'a>(input: &'a Value, field: &'static str) -> Result<&'a str, ValidationError> {
    input
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingField(field))
}
