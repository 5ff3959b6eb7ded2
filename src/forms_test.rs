use super::*;

fn login(email: &str, password: &str) -> FormState {
    let mut form = FormState::new(FormKind::Login);
    form.set(EMAIL, email);
    form.set(PASSWORD, password);
    form
}

fn register(name: &str, email: &str, password: &str, confirm: &str) -> FormState {
    let mut form = FormState::new(FormKind::Register);
    form.set(NAME, name);
    form.set(EMAIL, email);
    form.set(PASSWORD, password);
    form.set(CONFIRM_PASSWORD, confirm);
    form
}

#[test]
fn new_form_has_empty_values_and_no_errors() {
    let form = FormState::new(FormKind::Register);
    for field in FormKind::Register.fields() {
        assert_eq!(form.value(field), "");
    }
    assert!(form.errors().is_empty());
}

#[test]
fn login_empty_form_reports_required_fields() {
    let mut form = login("", "");
    assert!(!form.validate());
    assert_eq!(form.error(EMAIL).unwrap().to_string(), "Email is required");
    assert_eq!(form.error(PASSWORD).unwrap().to_string(), "Password is required");
}

#[test]
fn login_rejects_bad_email_and_short_password() {
    let mut form = login("a@b", "abcde");
    assert!(!form.validate());
    assert_eq!(form.error(EMAIL), Some(&FieldError::InvalidEmail));
    assert_eq!(form.error(PASSWORD).unwrap().to_string(), "Password must be at least 6 characters");
}

#[test]
fn login_does_not_cap_password_length() {
    let mut form = login("a@b.c", &"p".repeat(80));
    assert!(form.validate());
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut form = login("", "");
    form.validate();
    form.set(EMAIL, "a");
    assert_eq!(form.error(EMAIL), None);
    assert!(form.error(PASSWORD).is_some());
}

#[test]
fn unknown_fields_are_ignored() {
    let mut form = FormState::new(FormKind::Login);
    form.set("role", "admin");
    assert_eq!(form.value("role"), "");
}

#[test]
fn register_checks_confirmation() {
    let mut form = register("Al", "al@x.io", "secret1", "");
    assert!(!form.validate());
    assert_eq!(form.error(CONFIRM_PASSWORD).unwrap().to_string(), "Please confirm your password");

    form.set(CONFIRM_PASSWORD, "secret2");
    assert!(!form.validate());
    assert_eq!(form.error(CONFIRM_PASSWORD).unwrap().to_string(), "Passwords do not match");

    form.set(CONFIRM_PASSWORD, "secret1");
    assert!(form.validate());
}

#[test]
fn register_name_rules() {
    let mut form = register("", "al@x.io", "secret1", "secret1");
    form.validate();
    assert_eq!(form.error(NAME).unwrap().to_string(), "Name is required");

    form.set(NAME, "A");
    form.validate();
    assert_eq!(form.error(NAME).unwrap().to_string(), "Name must be at least 2 characters");
}

#[test]
fn register_request_drops_confirmation() {
    let form = register("Al", "al@x.io", "secret1", "secret1");
    let body = serde_json::to_value(form.register_request()).unwrap();
    assert_eq!(body, serde_json::json!({ "name": "Al", "email": "al@x.io", "password": "secret1" }));
}

#[test]
fn profile_uses_trimmed_name_rule() {
    let mut form = FormState::new(FormKind::Profile);
    form.set(NAME, "  ");
    form.set(EMAIL, "john.doe@example.com");
    assert!(!form.validate());
    assert_eq!(form.error(NAME).unwrap().to_string(), "Name is required");

    form.set(NAME, "John Doe");
    form.set("bio", "anything goes");
    assert!(form.validate());
}

#[test]
fn reset_clears_values_and_errors() {
    let mut form = login("x", "");
    form.validate();
    form.reset();
    assert_eq!(form.value(EMAIL), "");
    assert!(form.errors().is_empty());
    assert_eq!(form.kind(), FormKind::Login);
}
