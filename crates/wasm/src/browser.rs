//! Browser-only pieces: console logging, the panic hook, and
//! `localStorage`.

use log::{Level, LevelFilter, Log, Metadata, Record, warn};
use vitae_core::util::{KeyValueStore, Storage, StorageError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Raise or lower console verbosity (`"debug"`, `"warn"`, ...).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

/// `window.localStorage`.
pub struct LocalStorage(web_sys::Storage);

impl LocalStorage {
    /// `None` when storage is disabled or blocked.
    pub fn open() -> Option<Self> {
        web_sys::window()?.local_storage().ok().flatten().map(Self)
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn write_error(key: &str, err: &JsValue) -> StorageError {
    let quota = err
        .dyn_ref::<web_sys::DomException>()
        .is_some_and(|e| e.name() == "QuotaExceededError");
    if quota {
        StorageError::QuotaExceeded {
            key: key.to_string(),
        }
    } else {
        StorageError::AccessDenied(describe(err))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0
            .get_item(key)
            .map_err(|e| StorageError::AccessDenied(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set_item(key, value).map_err(|e| write_error(key, &e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.0
            .remove_item(key)
            .map_err(|e| StorageError::AccessDenied(describe(&e)))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.0
            .clear()
            .map_err(|e| StorageError::AccessDenied(describe(&e)))
    }
}

fn storage() -> Storage<LocalStorage> {
    LocalStorage::open().map_or_else(Storage::unavailable, Storage::new)
}

/// The stored JSON value for `key`, or `undefined`.
#[wasm_bindgen]
pub fn storage_get(key: &str) -> Option<String> {
    let value = storage().get(key, serde_json::Value::Null);
    (!value.is_null()).then(|| value.to_string())
}

#[wasm_bindgen]
pub fn storage_set(key: &str, value_json: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(value_json) {
        Ok(value) => storage().set(key, &value),
        Err(e) => {
            warn!("storage: refusing to store `{key}`: {e}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn storage_remove(key: &str) -> bool {
    storage().remove(key)
}

#[wasm_bindgen]
pub fn storage_clear() -> bool {
    storage().clear()
}
