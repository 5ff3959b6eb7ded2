//! Field validators and text helpers shared by the form views.
//!
//! Everything here is a pure function: no I/O, no shared state.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::OnceLock;

use regex::Regex;
use time::Date;
use time::macros::format_description;

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 50;
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;

/// A field-level validation failure. `Display` is the message shown next to
/// the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: String },
    #[error("{label} must be at least {min} characters")]
    TooShort { label: String, min: usize },
    #[error("{label} must be less than {max} characters")]
    TooLong { label: String, max: usize },
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Please confirm your password")]
    ConfirmationMissing,
    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

impl FieldError {
    pub(crate) fn required(label: &str) -> Self {
        Self::Required { label: label.to_owned() }
    }

    pub(crate) fn too_short(label: &str, min: usize) -> Self {
        Self::TooShort { label: label.to_owned(), min }
    }

    pub(crate) fn too_long(label: &str, max: usize) -> Self {
        Self::TooLong { label: label.to_owned(), max }
    }
}

// =============================================================================
// VALIDATORS
// =============================================================================

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape only: one `@`, no whitespace, a dot somewhere after the `@`.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// `true` when `email` matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Standalone password rule: required, 6..=50 characters.
///
/// # Errors
///
/// Returns `Required`, `TooShort`, or `TooLong`.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    let len = password.chars().count();
    if len == 0 {
        return Err(FieldError::required("Password"));
    }
    if len < PASSWORD_MIN_LEN {
        return Err(FieldError::too_short("Password", PASSWORD_MIN_LEN));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(FieldError::too_long("Password", PASSWORD_MAX_LEN));
    }
    Ok(())
}

/// Name rule on the trimmed value: required, 2..=100 characters.
///
/// # Errors
///
/// Returns `Required`, `TooShort`, or `TooLong`.
pub fn validate_name(name: &str) -> Result<(), FieldError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(FieldError::required("Name"));
    }
    if len < NAME_MIN_LEN {
        return Err(FieldError::too_short("Name", NAME_MIN_LEN));
    }
    if len > NAME_MAX_LEN {
        return Err(FieldError::too_long("Name", NAME_MAX_LEN));
    }
    Ok(())
}

/// Generic non-blank check; the message names `label`.
///
/// # Errors
///
/// Returns `Required` when `value` is empty or all whitespace.
pub fn validate_required(value: &str, label: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::required(label));
    }
    Ok(())
}

// =============================================================================
// TEXT HELPERS
// =============================================================================

/// Applied in this order; `&` must come first so later entities are not
/// escaped again.
const ESCAPES: [(&str, &str); 6] = [
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#x27;"),
    ("/", "&#x2F;"),
];

/// Entity-escape the HTML-significant characters and `/`.
///
/// This is a denylist escape for display, not an HTML sanitizer.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    ESCAPES.iter().fold(input.to_owned(), |acc, (raw, entity)| acc.replace(raw, entity))
}

/// Render an ISO-8601 date (or datetime) as `Jan 10, 2026`. Anything that
/// does not start with a valid `YYYY-MM-DD` renders as an empty string.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let Some(day) = raw.trim().get(..10) else {
        return String::new();
    };
    Date::parse(day, format_description!("[year]-[month]-[day]"))
        .ok()
        .and_then(|d| d.format(format_description!("[month repr:short] [day padding:none], [year]")).ok())
        .unwrap_or_default()
}

/// Cut `text` to `max_len` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_owned(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// The resume view only accepts PDFs: by MIME type or by file extension.
#[must_use]
pub fn is_pdf_upload(file_name: &str, mime: Option<&str>) -> bool {
    mime == Some("application/pdf") || file_name.ends_with(".pdf")
}
