//! `wasm-bindgen` bridge: every page call takes and returns JSON.

#[cfg(target_arch = "wasm32")]
mod browser;
mod error;
pub mod registry;
pub mod utils;

pub use error::BridgeError;

use wasm_bindgen::prelude::*;

fn js(e: BridgeError) -> JsError {
    JsError::new(&e.to_string())
}

/// Mount a page from its markup scan. Returns
/// `{"handle", "commands", "diagnostics"}` as JSON.
#[wasm_bindgen]
pub fn mount_page(
    markup_json: &str,
    config_json: &str,
    seed: u32,
    now: f64,
    host_delivery: bool,
) -> Result<String, JsError> {
    registry::mount(markup_json, config_json, host_delivery, u64::from(seed), now).map_err(js)
}

/// Feed one browser event to a page, returning commands as JSON.
#[wasm_bindgen]
pub fn page_event(handle: usize, event_json: &str, now: f64) -> Result<String, JsError> {
    registry::dispatch(handle, event_json, now).map_err(js)
}

#[wasm_bindgen]
pub fn page_advance(handle: usize, now: f64) -> Result<String, JsError> {
    registry::advance(handle, now).map_err(js)
}

#[wasm_bindgen]
pub fn page_frame(handle: usize, now: f64) -> Result<String, JsError> {
    registry::frame(handle, now).map_err(js)
}

#[wasm_bindgen]
pub fn page_next_deadline(handle: usize) -> Result<Option<f64>, JsError> {
    registry::next_deadline(handle).map_err(js)
}

#[wasm_bindgen]
pub fn page_wants_frames(handle: usize) -> Result<bool, JsError> {
    registry::wants_frames(handle).map_err(js)
}

#[wasm_bindgen]
pub fn page_scramble(handle: usize, node: u32, from: &str, to: &str) -> Result<String, JsError> {
    registry::scramble(handle, node, from, to).map_err(js)
}

#[wasm_bindgen]
pub fn page_diagnostics(handle: usize) -> Result<String, JsError> {
    registry::diagnostics(handle).map_err(js)
}

#[wasm_bindgen]
pub fn unmount_page(handle: usize) -> Result<String, JsError> {
    registry::unmount(handle).map_err(js)
}

#[wasm_bindgen]
pub fn capitalize(s: &str) -> String {
    vitae_core::util::strings::capitalize(s)
}

#[wasm_bindgen]
pub fn slugify(s: &str) -> String {
    vitae_core::util::strings::slugify(s)
}

#[wasm_bindgen]
pub fn truncate(s: &str, max_chars: usize) -> String {
    vitae_core::util::strings::truncate(s, max_chars)
}

#[wasm_bindgen]
pub fn format_with_commas(n: f64) -> String {
    utils::format_number(n)
}

#[wasm_bindgen]
pub fn is_valid_email(email: &str) -> bool {
    vitae_core::util::validate::is_valid_email(email)
}

#[wasm_bindgen]
pub fn is_valid_phone(phone: &str) -> bool {
    vitae_core::util::validate::is_valid_phone(phone)
}

#[wasm_bindgen]
pub fn is_valid_url(input: &str) -> bool {
    vitae_core::util::validate::is_valid_url(input)
}

/// "3 hours ago" style label for two epoch-millisecond timestamps.
#[wasm_bindgen]
pub fn relative_time(then_ms: f64, now_ms: f64) -> Option<String> {
    utils::relative_time_ms(then_ms, now_ms)
}

#[wasm_bindgen]
pub fn detect_browser(user_agent: &str) -> String {
    utils::browser_name(user_agent)
}

#[wasm_bindgen]
pub fn is_mobile(user_agent: &str) -> bool {
    vitae_core::util::browser::is_mobile(user_agent)
}

#[wasm_bindgen]
pub fn is_tablet(user_agent: &str) -> bool {
    vitae_core::util::browser::is_tablet(user_agent)
}
