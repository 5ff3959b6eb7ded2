//! Per-view form state: field values plus field errors.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login, register, and profile views each own one `FormState`. Editing
//! a field clears that field's error; submitting runs the view's rules and
//! replaces the whole error map. Validation failures never reach the network.
//!
//! The login and register rules are the inline page rules, which differ from
//! the standalone validators in `validation`: neither page caps password
//! length, and the register page checks the untrimmed name length.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::collections::BTreeMap;

use crate::api::auth::RegisterRequest;
use crate::validation::{FieldError, NAME_MIN_LEN, PASSWORD_MIN_LEN, is_valid_email, validate_name};

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const NAME: &str = "name";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

pub const PROFILE_FIELDS: [&str; 12] = [
    NAME,
    EMAIL,
    "phone",
    "location",
    "title",
    "bio",
    "linkedin",
    "github",
    "website",
    "experience",
    "availability",
    "expectedSalary",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    Profile,
}

impl FormKind {
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Login => &[EMAIL, PASSWORD],
            Self::Register => &[NAME, EMAIL, PASSWORD, CONFIRM_PASSWORD],
            Self::Profile => &PROFILE_FIELDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    kind: FormKind,
    values: BTreeMap<&'static str, String>,
    errors: BTreeMap<&'static str, FieldError>,
}

impl FormState {
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        let values = kind.fields().iter().map(|f| (*f, String::new())).collect();
        Self { kind, values, errors: BTreeMap::new() }
    }

    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Update `field` and clear its error. Unknown fields are ignored.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let Some(key) = self.kind.fields().iter().find(|f| **f == field).copied() else {
            tracing::debug!(field, "ignoring unknown form field");
            return;
        };
        self.values.insert(key, value.into());
        self.errors.remove(key);
    }

    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<&'static str, FieldError> {
        &self.errors
    }

    /// Run this form's rules, replacing the error map. Returns `true` when
    /// no field failed.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.kind {
            FormKind::Login => self.login_errors(),
            FormKind::Register => self.register_errors(),
            FormKind::Profile => self.profile_errors(),
        };
        self.errors.is_empty()
    }

    /// Clear all values and errors after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Registration payload; the confirmation field is dropped.
    #[must_use]
    pub fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.value(NAME).to_owned(),
            email: self.value(EMAIL).to_owned(),
            password: self.value(PASSWORD).to_owned(),
        }
    }

    // =========================================================================
    // RULES
    // =========================================================================

    fn email_error(&self) -> Option<FieldError> {
        let email = self.value(EMAIL);
        if email.is_empty() {
            Some(FieldError::required("Email"))
        } else if !is_valid_email(email) {
            Some(FieldError::InvalidEmail)
        } else {
            None
        }
    }

    fn password_error(&self) -> Option<FieldError> {
        let len = self.value(PASSWORD).chars().count();
        if len == 0 {
            Some(FieldError::required("Password"))
        } else if len < PASSWORD_MIN_LEN {
            Some(FieldError::too_short("Password", PASSWORD_MIN_LEN))
        } else {
            None
        }
    }

    fn login_errors(&self) -> BTreeMap<&'static str, FieldError> {
        [(EMAIL, self.email_error()), (PASSWORD, self.password_error())]
            .into_iter()
            .filter_map(|(field, err)| err.map(|e| (field, e)))
            .collect()
    }

    fn register_errors(&self) -> BTreeMap<&'static str, FieldError> {
        let name = self.value(NAME);
        let name_error = if name.is_empty() {
            Some(FieldError::required("Name"))
        } else if name.chars().count() < NAME_MIN_LEN {
            Some(FieldError::too_short("Name", NAME_MIN_LEN))
        } else {
            None
        };

        let confirm = self.value(CONFIRM_PASSWORD);
        let confirm_error = if confirm.is_empty() {
            Some(FieldError::ConfirmationMissing)
        } else if confirm != self.value(PASSWORD) {
            Some(FieldError::ConfirmationMismatch)
        } else {
            None
        };

        [
            (NAME, name_error),
            (EMAIL, self.email_error()),
            (PASSWORD, self.password_error()),
            (CONFIRM_PASSWORD, confirm_error),
        ]
        .into_iter()
        .filter_map(|(field, err)| err.map(|e| (field, e)))
        .collect()
    }

    fn profile_errors(&self) -> BTreeMap<&'static str, FieldError> {
        [(NAME, validate_name(self.value(NAME)).err()), (EMAIL, self.email_error())]
            .into_iter()
            .filter_map(|(field, err)| err.map(|e| (field, e)))
            .collect()
    }
}
