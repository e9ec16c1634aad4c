//! Input validation for account and content fields

use crate::error::CoreError;

/// Maximum password length in bytes, bounds the cost of a derivation request
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_TITLE_LENGTH: usize = 200;

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(CoreError::BadRequest(format!(
            "Email must be 1-{} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoreError::BadRequest("Email is not valid".to_string())),
    }
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::BadRequest("Password cannot be empty".to_string()));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(CoreError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(CoreError::BadRequest(format!(
            "Name must be 1-{} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() || title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::BadRequest(format!(
            "Title must be 1-{} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::BadRequest("Content cannot be empty".to_string()));
    }
    Ok(())
}
