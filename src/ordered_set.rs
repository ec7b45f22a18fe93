use std::{collections::HashMap, hash::Hash};

/// A keyed set that iterates in insertion order.
///
/// Entries are stored densely in a vector, with a side index mapping each
/// key to its position.  Lookups are O(1); removal shifts later entries down
/// to preserve order, so it is O(n) in the number of entries.
#[derive(Clone, Debug)]
pub(crate) struct OrderedSet<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedSet<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> OrderedSet<K, V>
where
    K: Eq + Hash + Copy,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts an entry unless the key is already present, in which case the
    /// existing entry keeps both its value and its position.  Returns whether
    /// the entry was inserted.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((key, value));
        true
    }

    /// Removes the entry with the given key, preserving the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (k, _) in &self.entries[position..] {
            if let Some(i) = self.index.get_mut(k) {
                *i -= 1;
            }
        }
        Some(value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        self.index.reserve(additional);
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Removes every entry, returning the values in insertion order.
    pub fn drain_values(&mut self) -> Vec<V> {
        self.index.clear();
        self.entries.drain(..).map(|(_, value)| value).collect()
    }
}
