//! Conversions between JS-friendly values and the core helpers.

use chrono::DateTime;
use vitae_core::util::browser::{BrowserFamily, detect_browser};
use vitae_core::util::dates::relative_time;
use vitae_core::util::numbers::format_with_commas;

/// JS numbers are doubles; anything past `i64` saturates.
pub fn format_number(n: f64) -> String {
    if n.is_finite() {
        format_with_commas(n.trunc() as i64)
    } else {
        n.to_string()
    }
}

pub fn relative_time_ms(then_ms: f64, now_ms: f64) -> Option<String> {
    let then = DateTime::from_timestamp_millis(then_ms as i64)?;
    let now = DateTime::from_timestamp_millis(now_ms as i64)?;
    Some(relative_time(&then, &now))
}

pub fn browser_name(user_agent: &str) -> String {
    match detect_browser(user_agent) {
        BrowserFamily::Chrome => "chrome",
        BrowserFamily::Firefox => "firefox",
        BrowserFamily::Safari => "safari",
        BrowserFamily::Edge => "edge",
        BrowserFamily::Opera => "opera",
        BrowserFamily::Unknown => "unknown",
    }
    .to_string()
}
