use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable text that is cheap to clone.
///
/// Phrases, labels, and class names are re-emitted on every tick of an
/// animation; cloning an `Arc<str>` keeps those commands allocation-free.
#[derive(Debug, Clone, Eq)]
pub struct SharedStr(Arc<str>);

impl SharedStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// The first `chars` characters, as a borrowed slice.
    pub fn prefix(&self, chars: usize) -> &str {
        match self.0.char_indices().nth(chars) {
            Some((byte, _)) => &self.0[..byte],
            None => &self.0,
        }
    }
}

impl PartialEq for SharedStr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<str> for SharedStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SharedStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Ord for SharedStr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for SharedStr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for SharedStr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

impl std::ops::Deref for SharedStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SharedStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SharedStr {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedStr {
    #[inline]
    fn from(s: &str) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<String> for SharedStr {
    #[inline]
    fn from(s: String) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl std::fmt::Display for SharedStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled so serde's `rc` feature stays off.
impl Serialize for SharedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SharedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Owned: escaped JSON strings cannot be borrowed from the input.
        let s = String::deserialize(deserializer)?;
        Ok(SharedStr::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_counts_characters_not_bytes() {
        let s = SharedStr::from("héllo");
        assert_eq!(s.prefix(0), "");
        assert_eq!(s.prefix(2), "hé");
        assert_eq!(s.prefix(5), "héllo");
        assert_eq!(s.prefix(9), "héllo");
        assert_eq!(s.char_len(), 5);
    }

    #[test]
    fn compares_with_str() {
        let s = SharedStr::from("active");
        assert_eq!(s, "active");
        assert!(s == *"active");
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(SharedStr::from("about"), 3);
        assert_eq!(map.get("about"), Some(&3));
    }

    #[test]
    fn deserializes_escaped_json() {
        let s: SharedStr = serde_json::from_str(r#""line\nbreak""#).unwrap_or_else(|_| "".into());
        assert_eq!(s, "line\nbreak");
        let json = serde_json::to_string(&s).unwrap_or_default();
        assert_eq!(json, r#""line\nbreak""#);
    }
}
