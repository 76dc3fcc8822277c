//! Client-side checks run before any request is sent.

use api::Credentials;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    EmptyEmail,
    #[error("Please enter your password")]
    EmptyPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Please enter some text")]
    EmptyText,
    #[error("unknown dashboard page: {0}")]
    UnknownPage(String),
}

pub fn login_credentials(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(Credentials::new(email, password))
}

pub fn registration_credentials(
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<Credentials, ValidationError> {
    let credentials = login_credentials(email, password)?;
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(credentials)
}

/// Trimmed spellcheck input.
pub fn spellcheck_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(login_credentials(" ", "pw"), Err(ValidationError::EmptyEmail));
        assert_eq!(login_credentials("a@b.de", ""), Err(ValidationError::EmptyPassword));
        let credentials = login_credentials(" a@b.de ", "pw").unwrap();
        assert_eq!(credentials.email, "a@b.de");
    }

    #[test]
    fn test_registration_rules() {
        assert_eq!(
            registration_credentials("a@b.de", "secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            registration_credentials("a@b.de", "abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert!(registration_credentials("a@b.de", "secret", "secret").is_ok());
    }

    #[test]
    fn test_spellcheck_text() {
        assert_eq!(spellcheck_text("  \n"), Err(ValidationError::EmptyText));
        assert_eq!(spellcheck_text(" Helo "), Ok("Helo".to_string()));
    }
}
