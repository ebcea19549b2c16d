use alloc::string::String;
use core::fmt;

use bd_utils::hash::HashMap;

use super::Slot;
use crate::error::CodecError;
use crate::plan::Codec;

/// A mapping from string key to [`Slot`].
///
/// Keys are unique within one container and insertion order is irrelevant:
/// two containers are equal when they hold the same keys with equal slots.
///
/// # Examples
///
/// ```
/// use bd_codec::container::Container;
///
/// let mut address = Container::new();
/// address.put_text("city", "NYC");
/// address.put_i32("zip", 10001);
///
/// let mut person = Container::new();
/// person.put_text("name", "Bo");
/// person.put_nested("address", address);
///
/// assert_eq!(person.get_nested("address").and_then(|a| a.get_i32("zip")), Some(10001));
/// assert!(!person.contains_key("age"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Container {
    slots: HashMap<String, Slot>,
}

impl Container {
    /// Creates an empty container.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: HashMap::with_hasher(bd_utils::hash::FixedHashState),
        }
    }

    /// Creates an empty container with room for `capacity` keys.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.slots.get(key)
    }

    /// Inserts a slot, returning the one previously stored under `key`.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, slot: impl Into<Slot>) -> Option<Slot> {
        self.slots.insert(key.into(), slot.into())
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Slot> {
        self.slots.remove(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Iterates over the keys in arbitrary order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Iterates over the entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn put_i32(&mut self, key: impl Into<String>, value: i32) {
        self.slots.insert(key.into(), Slot::Int32(value));
    }

    #[inline]
    pub fn put_i64(&mut self, key: impl Into<String>, value: i64) {
        self.slots.insert(key.into(), Slot::Int64(value));
    }

    #[inline]
    pub fn put_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(key.into(), Slot::Text(value.into()));
    }

    #[inline]
    pub fn put_nested(&mut self, key: impl Into<String>, value: Container) {
        self.slots.insert(key.into(), Slot::Nested(value));
    }

    /// Returns the `i32` at `key`, `None` if absent or of another kind.
    #[inline]
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Slot::as_i32)
    }

    /// Returns the `i64` at `key`, `None` if absent or of another kind.
    #[inline]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Slot::as_i64)
    }

    /// Returns the text at `key`, `None` if absent or of another kind.
    #[inline]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Slot::as_text)
    }

    /// Returns the container at `key`, `None` if absent or of another kind.
    #[inline]
    pub fn get_nested(&self, key: &str) -> Option<&Container> {
        self.get(key).and_then(Slot::as_nested)
    }

    /// Moves every entry of `other` into `self`, overwriting equal keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use bd_codec::container::Container;
    ///
    /// let mut base = Container::new();
    /// base.put_i32("a", 1);
    /// base.put_i32("b", 2);
    ///
    /// let mut extra = Container::new();
    /// extra.put_i32("b", 3);
    ///
    /// base.merge(extra);
    /// assert_eq!(base.get_i32("a"), Some(1));
    /// assert_eq!(base.get_i32("b"), Some(3));
    /// ```
    pub fn merge(&mut self, other: Container) {
        self.slots.extend(other.slots);
    }

    /// Decodes a value out of this container with `codec`.
    #[inline]
    pub fn decode_with<T, C: Codec<T> + ?Sized>(&self, codec: &C) -> Result<T, CodecError> {
        codec.decode(self)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted, so that debug output is stable.
        let mut entries: alloc::vec::Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        f.debug_map().entries(entries).finish()
    }
}

impl<K: Into<String>, V: Into<Slot>> FromIterator<(K, V)> for Container {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut container = Container::new();
        container.extend(iter);
        container
    }
}

impl<K: Into<String>, V: Into<Slot>> Extend<(K, V)> for Container {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.slots
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Container;
    use crate::container::{Slot, SlotKind};

    #[test]
    fn typed_getters_reject_other_kinds() {
        let mut c = Container::new();
        c.put_i32("age", 30);
        c.put_i64("id", 1 << 40);
        c.put_text("name", "Ann");

        assert_eq!(c.get_i32("age"), Some(30));
        assert_eq!(c.get_i64("age"), None);
        assert_eq!(c.get_i64("id"), Some(1 << 40));
        assert_eq!(c.get_text("name"), Some("Ann"));
        assert_eq!(c.get_nested("name"), None);
        assert_eq!(c.get("missing"), None);
        assert_eq!(c.get("id").map(Slot::kind), Some(SlotKind::Int64));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Container = [("x", Slot::Int32(1)), ("y", Slot::from("z"))]
            .into_iter()
            .collect();
        let b: Container = [("y", Slot::from("z")), ("x", Slot::Int32(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);

        let c: Container = [("x", Slot::Int64(1)), ("y", Slot::from("z"))]
            .into_iter()
            .collect();
        assert_ne!(a, c);
    }

    #[test]
    fn insert_replaces_and_remove() {
        let mut c = Container::new();
        assert_eq!(c.insert("k", 1), None);
        assert_eq!(c.insert("k", "v"), Some(Slot::Int32(1)));
        assert_eq!(c.len(), 1);
        assert_eq!(c.remove("k"), Some(Slot::from("v")));
        assert!(c.is_empty());
    }

    #[test]
    fn debug_is_sorted() {
        let mut c = Container::new();
        c.put_i32("b", 2);
        c.put_i32("a", 1);
        assert_eq!(format!("{c:?}"), r#"{"a": Int32(1), "b": Int32(2)}"#);
    }
}
