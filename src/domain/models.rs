use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Values of every signup field at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub password: String,
    pub confirm_password: String,
}

impl UserData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Cpf => &self.cpf,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Cpf => &mut self.cpf,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// A single input of the signup form, ordered as the form lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Cpf,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Cpf,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Cpf => "CPF",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
        }
    }

    /// Key used for this field in the serialized record.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Cpf => "cpf",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }

    pub fn next(self) -> Option<Field> {
        let idx = Self::ALL.iter().position(|f| *f == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn previous(self) -> Option<Field> {
        let idx = Self::ALL.iter().position(|f| *f == self)?;
        idx.checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Validation messages keyed by field. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }
}

/// Result of the most recent submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    Unset,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_serializes_with_camel_case_keys() {
        let data = UserData {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            cpf: "123.456.789-01".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&data).unwrap();
        for field in Field::ALL {
            assert_eq!(json[field.key()], data.get(field));
        }
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_set_and_get_field() {
        let mut data = UserData::default();
        assert!(data.is_empty());

        data.set(Field::ConfirmPassword, "secret".to_string());
        assert_eq!(data.get(Field::ConfirmPassword), "secret");
        assert_eq!(data.confirm_password, "secret");
        assert!(!data.is_empty());
    }

    #[test]
    fn test_field_order_navigation() {
        assert_eq!(Field::Name.next(), Some(Field::Cpf));
        assert_eq!(Field::ConfirmPassword.next(), None);
        assert_eq!(Field::Name.previous(), None);
        assert_eq!(Field::Email.previous(), Some(Field::Cpf));
    }

    #[test]
    fn test_form_errors_iterate_in_form_order() {
        let mut errors = FormErrors::new();
        errors.insert(Field::Password, "p");
        errors.insert(Field::Name, "n");

        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Name, Field::Password]);
        assert_eq!(errors.get(Field::Name), Some("n"));
        assert!(!errors.contains(Field::Email));
    }
}
