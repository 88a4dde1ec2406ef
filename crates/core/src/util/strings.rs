use std::sync::LazyLock;

use regex::{Captures, Regex};

#[allow(clippy::expect_used)]
static WORD_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^\w|[A-Z]|\b\w)").expect("valid word start regex"));
#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
#[allow(clippy::expect_used)]
static CAMEL_HUMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel hump regex"));
#[allow(clippy::expect_used)]
static SLUG_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s_-]").expect("valid slug strip regex"));
#[allow(clippy::expect_used)]
static SLUG_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid slug separator regex"));

const RANDOM_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// `"hello big world"` → `"helloBigWorld"`.
pub fn to_camel_case(s: &str) -> String {
    let humped = WORD_START_RE.replace_all(s, |caps: &Captures<'_>| {
        let Some(m) = caps.get(0) else {
            return String::new();
        };
        if m.start() == 0 {
            m.as_str().to_lowercase()
        } else {
            m.as_str().to_uppercase()
        }
    });
    WHITESPACE_RE.replace_all(&humped, "").into_owned()
}

/// `"helloWorld again"` → `"hello-world-again"`.
pub fn to_kebab_case(s: &str) -> String {
    let split = CAMEL_HUMP_RE.replace_all(s, "${1}-${2}");
    WHITESPACE_RE.replace_all(&split, "-").to_lowercase()
}

/// Cut to `max_chars` characters and append `...` when anything was cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte, _)) => format!("{}...", &s[..byte]),
        None => s.to_string(),
    }
}

/// URL slug: lowercase ASCII alphanumerics separated by single hyphens.
///
/// Idempotent: `slugify(&slugify(s)) == slugify(s)`.
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(lowered.trim(), "");
    let joined = SLUG_SEPARATOR_RE.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

/// Random alphanumeric string of `len` characters.
pub fn random_string(rng: &mut fastrand::Rng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(RANDOM_ALPHABET[rng.usize(..RANDOM_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_only_touches_case() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("émile ZOLA"), "Émile zola");
    }

    #[test]
    fn capitalize_property_over_samples() {
        for s in ["rust", "RUST", "rUsT lang", "1abc", "ñandú", "x"] {
            let out = capitalize(s);
            let mut chars = s.chars();
            let first = chars.next().map(|c| c.to_uppercase().collect::<String>());
            let rest = chars.as_str().to_lowercase();
            assert_eq!(out, format!("{}{rest}", first.unwrap_or_default()));
        }
    }

    #[test]
    fn camel_and_kebab() {
        assert_eq!(to_camel_case("hello big world"), "helloBigWorld");
        assert_eq!(to_camel_case("Hello World"), "helloWorld");
        assert_eq!(to_kebab_case("helloWorld again"), "hello-world-again");
        assert_eq!(to_kebab_case("Skill Item"), "skill-item");
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("overflowing", 4), "over...");
        assert_eq!(truncate("héllo", 2), "hé...");
    }

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("Rust_&_WebAssembly -- 2024"), "rust-webassembly-2024");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("Café Ünïcode"), "caf-ncode");
    }

    #[test]
    fn slugify_output_alphabet_and_idempotence() {
        let samples = [
            "Senior Engineer @ ACME (2019–2023)",
            "__init__",
            "-leading and trailing-",
            "tabs\tand\nnewlines",
            "ÀÉÎÕÜ mixed 123",
            "a--b__c  d",
            "!!!",
        ];
        for s in samples {
            let slug = slugify(s);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected char in {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
            assert_eq!(slugify(&slug), slug);
        }
    }

    #[test]
    fn random_string_uses_alphabet() {
        let mut rng = fastrand::Rng::with_seed(7);
        let s = random_string(&mut rng, 32);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(random_string(&mut rng, 0), "");
    }
}
