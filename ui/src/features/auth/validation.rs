//! Syntactic validation rules for the auth forms. Pure functions, no side
//! effects: form aggregates live on the form state types.

use regex::Regex;
use std::sync::LazyLock;

/// Standard local@domain pattern: unquoted dot-separated atoms or a quoted
/// local part, then either dot-separated alphanumeric/hyphen labels with a
/// TLD of at least two letters or a bracketed IPv4 literal
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email regex is valid")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{6,20}$").expect("username regex is valid"));

/// Allowed password alphabet: ASCII letters, digits, and a fixed punctuation
/// set. The at-least-one-letter rule is checked separately because the regex
/// crate has no lookahead.
static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[a-zA-Z0-9!@#$%^&*()_+=\-{}\[\]:;"'<>,.?/|\\~`]{8,30}$"#)
        .expect("password regex is valid")
});

/// Email well-formedness. Input is lowercased before matching.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// Username: 6-20 characters from `[a-zA-Z0-9_]`
pub fn validate_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Password: 8-30 characters from the allowed set, at least one ASCII letter
pub fn validate_password(password: &str) -> bool {
    PASSWORD_RE.is_match(password) && password.bytes().any(|b| b.is_ascii_alphabetic())
}
