use crate::constants::{MAX_MESSAGE_CHAR, MAX_NAME_CHAR};

/// Upper bounds applied to submitted fields, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_name_chars: usize,
    pub max_message_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_name_chars: MAX_NAME_CHAR,
            max_message_chars: MAX_MESSAGE_CHAR,
        }
    }
}

/// A name and message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is too long ({len} characters, maximum is {max})")]
    NameTooLong { len: usize, max: usize },
    #[error("Message is too long ({len} characters, maximum is {max})")]
    MessageTooLong { len: usize, max: usize },
}

pub fn validate(limits: &Limits, name: &str, message: &str) -> Result<Submission, ValidationError> {
    let name_len = name.chars().count();
    if name_len > limits.max_name_chars {
        return Err(ValidationError::NameTooLong {
            len: name_len,
            max: limits.max_name_chars,
        });
    }
    let message_len = message.chars().count();
    if message_len > limits.max_message_chars {
        return Err(ValidationError::MessageTooLong {
            len: message_len,
            max: limits.max_message_chars,
        });
    }
    Ok(Submission {
        name: name.to_string(),
        message: message.to_string(),
    })
}
