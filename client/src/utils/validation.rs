//! Validation utilities for the auth form.
//!
//! Only presence is checked; the backend owns every other rule.

use crate::app::state::{AuthForm, AuthMode};
use crate::core::error::{AppError, Result};

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// A required field must contain something other than whitespace.
pub fn validate_required(label: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::err(format!("{} is required", label));
    }
    ValidationResult::ok()
}

/// Check the fields the current mode submits. `name` only matters for signup.
pub fn validate_auth_form(form: &AuthForm) -> Result<()> {
    if form.mode == AuthMode::Signup {
        validate_required("Name", &form.name).into_result()?;
    }
    validate_required("Email", &form.email).into_result()?;
    validate_required("Password", &form.password).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mode: AuthMode, name: &str, email: &str, password: &str) -> AuthForm {
        AuthForm {
            mode,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    #[test]
    fn test_required_validation() {
        assert!(validate_required("Email", "a@b.c").is_valid);
        assert!(!validate_required("Email", "").is_valid);
        assert!(!validate_required("Email", "   ").is_valid);
    }

    #[test]
    fn test_login_ignores_name() {
        assert!(validate_auth_form(&form(AuthMode::Login, "", "a@b.c", "pw")).is_ok());
    }

    #[test]
    fn test_signup_requires_name() {
        let err = validate_auth_form(&form(AuthMode::Signup, "", "a@b.c", "pw")).unwrap_err();
        assert_eq!(err, AppError::Validation("Name is required".to_string()));
    }

    #[test]
    fn test_missing_password() {
        let err = validate_auth_form(&form(AuthMode::Login, "", "a@b.c", "")).unwrap_err();
        assert_eq!(err.message(), "Password is required");
    }
}
