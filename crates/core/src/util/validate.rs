use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));

/// `local@domain.tld`, with no whitespace and exactly one `@` per part.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// E.164-ish: optional `+`, no leading zero, at most 16 digits.
/// Whitespace is ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}

/// Absolute URL that parses.
pub fn is_valid_url(input: &str) -> bool {
    url::Url::parse(input).is_ok()
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Outcome of [`validate_required`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check that every name in `required` maps to a non-blank value.
/// Absent names count as blank.
pub fn validate_required<'a>(
    lookup: impl Fn(&str) -> Option<&'a str>,
    required: &[&str],
) -> RequiredCheck {
    let errors: Vec<String> = required
        .iter()
        .filter(|field| lookup(field).is_none_or(is_blank))
        .map(|field| format!("{field} is required"))
        .collect();
    RequiredCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}
