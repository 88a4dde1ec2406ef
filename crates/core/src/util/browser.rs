use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("valid mobile regex")
});
#[allow(clippy::expect_used)]
static TABLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iPad|Android|Tablet").expect("valid tablet regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserFamily {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Opera,
    Unknown,
}

/// Guess the browser family from a user-agent string.
///
/// Checks run in a fixed order, so Chromium-based Edge and Opera report
/// `Chrome` just like the page always has.
pub fn detect_browser(user_agent: &str) -> BrowserFamily {
    const ORDER: [(&str, BrowserFamily); 5] = [
        ("Chrome", BrowserFamily::Chrome),
        ("Firefox", BrowserFamily::Firefox),
        ("Safari", BrowserFamily::Safari),
        ("Edge", BrowserFamily::Edge),
        ("Opera", BrowserFamily::Opera),
    ];
    ORDER
        .iter()
        .find(|(needle, _)| user_agent.contains(needle))
        .map_or(BrowserFamily::Unknown, |(_, family)| *family)
}

pub fn is_mobile(user_agent: &str) -> bool {
    MOBILE_RE.is_match(user_agent)
}

/// Tablet-like user agents that are not already classified as mobile.
pub fn is_tablet(user_agent: &str) -> bool {
    TABLET_RE.is_match(user_agent) && !is_mobile(user_agent)
}
