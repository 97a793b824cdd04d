use thiserror::Error;

/// A single violated submission rule. `Display` is the client-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field \"{0}\" is required")]
    MissingField(&'static str),

    #[error("Name must be between 1 and 100 characters")]
    NameLength,

    #[error("Please provide a valid email address")]
    InvalidEmail,

    #[error("Message must be between 10 and 1000 characters")]
    MessageLength,

    #[error("Message content appears to be spam")]
    Spam,
}

impl ValidationError {
    /// Rule identifier used in logs
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "required",
            ValidationError::NameLength => "name_length",
            ValidationError::InvalidEmail => "email_format",
            ValidationError::MessageLength => "message_length",
            ValidationError::Spam => "spam",
        }
    }
}
