//! Ordered map type backing every object/mapping/table element.
//!
//! [`ElementMap`] wraps [`IndexMap`] so that all three element families share
//! one key→element container with insertion-order iteration. Order matters
//! for serialization (documents re-serialize with their keys in the order
//! they were inserted) but *not* for equality: two maps holding the same
//! key→value pairs in different insertion order compare equal.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::{ElementMap, JsonElement};
//!
//! let mut map = ElementMap::new();
//! map.insert("name".to_string(), JsonElement::from("Alice"));
//! map.insert("age".to_string(), JsonElement::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;

/// An insertion-ordered map of string keys to elements.
///
/// Generic over the element type so the JSON, TOML and YAML families all use
/// the same container. Equality is order-insensitive; iteration and therefore
/// serialization are order-preserving.
///
/// # Examples
///
/// ```rust
/// use polyform::{ElementMap, JsonElement};
///
/// let mut a = ElementMap::new();
/// a.insert("x".to_string(), JsonElement::from(1));
/// a.insert("y".to_string(), JsonElement::from(2));
///
/// let mut b = ElementMap::new();
/// b.insert("y".to_string(), JsonElement::from(2));
/// b.insert("x".to_string(), JsonElement::from(1));
///
/// // Same pairs, different insertion order: still equal
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct ElementMap<V>(IndexMap<String, V>);

impl<V> ElementMap<V> {
    /// Creates an empty `ElementMap`.
    #[must_use]
    pub fn new() -> Self {
        ElementMap(IndexMap::new())
    }

    /// Creates an empty `ElementMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ElementMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.0.get_mut(key)
    }

    /// Removes a key from the map, preserving the order of remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns a mutable iterator over the values, in insertion order.
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, V> {
        self.0.values_mut()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }

    /// Returns a mutable iterator over the key-value pairs, in insertion order.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, V> {
        self.0.iter_mut()
    }
}

impl<V: PartialEq> PartialEq for ElementMap<V> {
    fn eq(&self, other: &Self) -> bool {
        // Order-insensitive: same pairs in any insertion order are equal.
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(k, v)| other.0.get(k).is_some_and(|w| v == w))
    }
}

impl<V> Default for ElementMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for ElementMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a ElementMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for ElementMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        ElementMap(IndexMap::from_iter(iter))
    }
}

impl<V> Extend<(String, V)> for ElementMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
