//! Input validation utilities for the service layer.
//!
//! Field validators return the cleaned value or a single-field
//! [`Error::Validation`]. [`FieldErrors`] collects several of them so a
//! request reports every offending field at once.

use std::collections::HashMap;

use crate::error::{Error, Result, ValidationErrors};

/// Maximum length of names, usernames and movie titles.
pub const MAX_NAME_LENGTH: usize = 150;

/// Maximum length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const BLANK_MESSAGE: &str = "This field may not be blank.";

/// Collects field errors across several validators.
#[derive(Debug, Default)]
pub struct FieldErrors {
    fields: HashMap<String, String>,
}

impl FieldErrors {
    /// Records the error of `result` if it failed validation and returns the
    /// value otherwise. Non-validation errors are recorded as-is under the
    /// non-field key.
    pub fn check<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(Error::Validation(errors)) => {
                for (field, message) in errors.into_fields() {
                    self.fields.entry(field).or_insert(message);
                }
                None
            }
            Err(other) => {
                self.fields
                    .entry(crate::error::NON_FIELD_ERRORS.to_string())
                    .or_insert(other.to_string());
                None
            }
        }
    }

    /// Adds an error for `field` unless one is already recorded.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fails with every collected error, or succeeds when none were recorded.
    pub fn into_result(self) -> Result<()> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(ValidationErrors::Multiple {
                fields: self.fields,
            }))
        }
    }
}

/// Validates that a string field is present and not blank.
///
/// # Returns
/// * `Ok(String)` with the trimmed value
/// * `Err(Error)` naming `field_name` if missing or blank
pub fn validate_required_string(input: Option<&str>, field_name: &str) -> Result<String> {
    let Some(input) = input else {
        return Err(Error::field(field_name, REQUIRED_MESSAGE));
    };

    let sanitized = sanitize_string(input);
    if sanitized.is_empty() {
        return Err(Error::field(field_name, BLANK_MESSAGE));
    }

    Ok(sanitized)
}

/// Validates that `value` is at most `max` characters long.
pub fn validate_max_length(value: &str, field_name: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(Error::field(
            field_name,
            format!("Ensure this field has no more than {} characters.", max),
        ));
    }
    Ok(())
}

/// Validates a required name-like field (first name, last name).
pub fn validate_name(input: Option<&str>, field_name: &str) -> Result<String> {
    let name = validate_required_string(input, field_name)?;
    validate_max_length(&name, field_name, MAX_NAME_LENGTH)?;

    // Check for control characters
    if name.chars().any(|c| c.is_control()) {
        return Err(Error::field(field_name, "This field cannot contain control characters."));
    }

    Ok(name)
}

/// Validates a username: letters, digits and `@ . + - _` only.
pub fn validate_username(input: Option<&str>) -> Result<String> {
    let username = validate_required_string(input, "username")?;
    validate_max_length(&username, "username", MAX_NAME_LENGTH)?;

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(Error::field(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }

    Ok(username)
}

/// Validates email format using structural checks
///
/// # Examples
/// ```
/// use movierama::validation::validate_email;
///
/// assert!(validate_email(Some("user@example.com")).is_ok());
/// assert!(validate_email(Some("invalid-email")).is_err());
/// ```
pub fn validate_email(input: Option<&str>) -> Result<String> {
    let email = validate_required_string(input, "email")?;
    let invalid = || Error::field("email", "Enter a valid email address.");

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(invalid());
    }

    // Exactly one @ with non-empty parts on both sides
    let Some((local_part, domain)) = email.split_once('@') else {
        return Err(invalid());
    };
    if local_part.is_empty() || local_part.len() > 64 || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    // Domain needs a dot and no empty labels
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    if email.contains("..") {
        return Err(invalid());
    }

    let invalid_chars = ['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':', '"', ' '];
    if email.chars().any(|c| invalid_chars.contains(&c) || c.is_control()) {
        return Err(invalid());
    }

    Ok(email)
}

/// Validates a password. Only presence is enforced; it is never trimmed.
pub fn validate_password(input: Option<&str>) -> Result<String> {
    match input {
        None => Err(Error::field("password", REQUIRED_MESSAGE)),
        Some(password) if password.trim().is_empty() => {
            Err(Error::field("password", BLANK_MESSAGE))
        }
        Some(password) => Ok(password.to_string()),
    }
}

/// Validates a movie title.
pub fn validate_title(input: Option<&str>) -> Result<String> {
    let title = validate_required_string(input, "title")?;
    validate_max_length(&title, "title", MAX_NAME_LENGTH)?;
    Ok(title)
}

/// Sanitizes string input by trimming whitespace
pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}
