//! Small helpers with no page state.

pub mod browser;
pub mod cache;
pub mod dates;
pub mod easing;
pub mod geometry;
pub mod numbers;
pub mod rate;
pub mod storage;
pub mod strings;
pub mod validate;

pub use cache::BoundedCache;
pub use easing::{Easing, Tween};
pub use rate::{Debounce, Throttle};
pub use storage::{KeyValueStore, MemoryStore, Storage, StorageError};
