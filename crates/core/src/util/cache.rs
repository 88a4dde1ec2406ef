use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Fixed-capacity map that evicts the oldest inserted key first.
///
/// Overwriting an existing key keeps its original insertion position and
/// never evicts.
#[derive(Debug, Clone)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> BoundedCache<K, V> {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite. Returns the evicted entry, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.order
                .pop_front()
                .and_then(|old| self.entries.remove(&old).map(|v| (old, v)))
        } else {
            None
        };
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_inserted() {
        let mut cache = BoundedCache::new(2);
        assert!(cache.insert("a", 1).is_none());
        assert!(cache.insert("b", 2).is_none());
        assert_eq!(cache.insert("c", 3), Some(("a", 1)));
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut cache = BoundedCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert!(cache.insert("a", 10).is_none());
        assert_eq!(cache.get(&"a"), Some(&10));
        cache.insert("c", 3);
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn clear_and_zero_capacity() {
        let mut cache = BoundedCache::new(0);
        cache.insert(1, "x");
        cache.insert(2, "y");
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.keys().count(), 0);
    }
}
