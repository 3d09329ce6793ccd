//! Field validation for the signup form.
//!
//! Every rule is evaluated independently per field and the first failing
//! rule of a field determines its message.

use crate::domain::{Field, FormErrors, UserData};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

// ASCII digits only; `\d` would also accept other Unicode digits.
static CPF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("cpf pattern is valid")
});

pub struct Validator;

impl Validator {
    /// Validates a field snapshot and returns every failing field's message.
    ///
    /// # Examples
    ///
    /// ```
    /// use signup::domain::{Field, UserData, Validator};
    ///
    /// let errors = Validator::validate(&UserData::default());
    /// assert_eq!(errors.len(), 4);
    /// assert_eq!(errors.get(Field::Name), Some("Name is required"));
    /// ```
    pub fn validate(data: &UserData) -> FormErrors {
        let mut errors = FormErrors::new();

        let checks = [
            (Field::Name, Self::check_name(&data.name)),
            (Field::Email, Self::check_email(&data.email)),
            (Field::Cpf, Self::check_cpf(&data.cpf)),
            (Field::Password, Self::check_password(&data.password)),
            (
                Field::ConfirmPassword,
                Self::check_confirmation(&data.password, &data.confirm_password),
            ),
        ];

        for (field, result) in checks {
            if let Err(message) = result {
                errors.insert(field, message);
            }
        }

        errors
    }

    pub fn is_valid(data: &UserData) -> bool {
        Self::validate(data).is_empty()
    }

    fn check_name(name: &str) -> Result<(), &'static str> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Err("Name is required")
        } else if trimmed.chars().count() < MIN_NAME_LENGTH {
            Err("Name must be at least 3 characters")
        } else {
            Ok(())
        }
    }

    fn check_email(email: &str) -> Result<(), &'static str> {
        if email.trim().is_empty() {
            Err("Email is required")
        } else if !EMAIL_PATTERN.is_match(email) {
            Err("Invalid email")
        } else {
            Ok(())
        }
    }

    fn check_cpf(cpf: &str) -> Result<(), &'static str> {
        if cpf.trim().is_empty() {
            Err("CPF is required")
        } else if !CPF_PATTERN.is_match(cpf) {
            Err("Invalid CPF")
        } else {
            Ok(())
        }
    }

    fn check_password(password: &str) -> Result<(), &'static str> {
        if password.is_empty() {
            Err("Password is required")
        } else if password.chars().count() < MIN_PASSWORD_LENGTH {
            Err("Password must be at least 6 characters")
        } else {
            Ok(())
        }
    }

    fn check_confirmation(password: &str, confirmation: &str) -> Result<(), &'static str> {
        if password == confirmation {
            Ok(())
        } else {
            Err("Passwords do not match")
        }
    }
}
