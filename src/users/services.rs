use lazy_static::lazy_static;
use regex::Regex;

use crate::users::repo_types::{required_message, StoreError};

pub(crate) const INVALID_EMAIL: &str = "Please provide a valid email address";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Name and email after normalization, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub name: String,
    pub email: String,
}

/// Trims both fields, lower-cases the email and reports every failing field at once.
pub fn validate_user(name: &str, email: &str) -> Result<ValidUser, StoreError> {
    let name = name.trim();
    let email = email.trim().to_lowercase();

    let mut messages = Vec::new();
    if name.is_empty() {
        messages.push(required_message("name"));
    }
    if email.is_empty() {
        messages.push(required_message("email"));
    } else if !is_valid_email(&email) {
        messages.push(INVALID_EMAIL.to_string());
    }

    if !messages.is_empty() {
        return Err(StoreError::Validation { messages });
    }

    Ok(ValidUser {
        name: name.to_string(),
        email,
    })
}
