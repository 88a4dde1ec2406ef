use thiserror::Error;
use vitae_core::ConfigError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid page handle {0}")]
    InvalidHandle(usize),
    #[error("page {0} was unmounted")]
    Unmounted(usize),
    #[error("too many mounted pages")]
    Full,
    #[error("page registry lock poisoned")]
    Poisoned,
    #[error("invalid markup JSON: {0}")]
    Markup(#[source] serde_json::Error),
    #[error("invalid event JSON: {0}")]
    Event(#[source] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not encode commands: {0}")]
    Encode(#[source] serde_json::Error),
}
