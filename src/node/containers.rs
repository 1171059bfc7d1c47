//! Mutable container nodes.
//!
//! Every insertion passes its key and value through [`Node::present`], so a
//! container never stores the missing sentinel: it is stored as null instead.

use std::collections::HashMap;

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

use super::{MISSING, Node};

/// Unordered mapping; a repeated key overwrites the previous value.
#[derive(Clone, Debug, Default)]
pub struct MapNode {
    entries: HashMap<Node, Node, RandomState>,
}

/// Insertion-ordered mapping.
///
/// A repeated key overwrites the value but keeps the slot of its first
/// insertion; it does not move to the end.
#[derive(Clone, Debug, Default)]
pub struct OrderedMapNode {
    entries: IndexMap<Node, Node, RandomState>,
}

/// Ordered list of key/value entries that keeps every put, duplicates
/// included.
#[derive(Clone, Debug, Default)]
pub struct PairsNode {
    entries: Vec<(Node, Node)>,
}

/// Ordered list of nodes; duplicates allowed.
#[derive(Clone, Debug, Default)]
pub struct SeqNode {
    items: Vec<Node>,
}

/// Insertion-ordered set of nodes. Adding a structurally equal node again is
/// a no-op and keeps the first occurrence.
#[derive(Clone, Debug, Default)]
pub struct SetNode {
    items: IndexSet<Node, RandomState>,
}

impl MapNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn put(&mut self, key: impl Into<Node>, value: impl Into<Node>) -> &mut Self {
        self.insert(key, value);
        self
    }

    /// Same as [`put`](Self::put) but returns the replaced value.
    pub fn insert(&mut self, key: impl Into<Node>, value: impl Into<Node>) -> Option<Node> {
        self.entries
            .insert(key.into().present(), value.into().present())
    }

    pub fn get(&self, key: &Node) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &Node) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Value under `key`, or [`Node::Missing`].
    pub fn path(&self, key: impl Into<Node>) -> &Node {
        self.get(&key.into()).unwrap_or(&MISSING)
    }

    pub fn has(&self, key: impl Into<Node>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn has_not_null(&self, key: impl Into<Node>) -> bool {
        self.get(&key.into()).is_some_and(|v| !v.is_null())
    }

    pub fn remove(&mut self, key: &Node) -> Option<Node> {
        self.entries.remove(key)
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Node> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.values()
    }
}

impl OrderedMapNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn put(&mut self, key: impl Into<Node>, value: impl Into<Node>) -> &mut Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<Node>, value: impl Into<Node>) -> Option<Node> {
        self.entries
            .insert(key.into().present(), value.into().present())
    }

    pub fn get(&self, key: &Node) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &Node) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Entry at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&Node, &Node)> {
        self.entries.get_index(index)
    }

    pub fn path(&self, key: impl Into<Node>) -> &Node {
        self.get(&key.into()).unwrap_or(&MISSING)
    }

    pub fn has(&self, key: impl Into<Node>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn has_not_null(&self, key: impl Into<Node>) -> bool {
        self.get(&key.into()).is_some_and(|v| !v.is_null())
    }

    /// Remove `key`; later entries shift down and keep their relative order.
    pub fn remove(&mut self, key: &Node) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Node> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.values()
    }
}

impl PairsNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. An existing entry with an equal key is kept.
    pub fn put(&mut self, key: impl Into<Node>, value: impl Into<Node>) -> &mut Self {
        self.entries
            .push((key.into().present(), value.into().present()));
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &Node) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Entry at position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&Node, &Node)> {
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    /// Every value stored under `key`, collected into a new sequence.
    /// Empty when the key is absent.
    pub fn path(&self, key: impl Into<Node>) -> SeqNode {
        self.values_for(&key.into())
    }

    pub(crate) fn values_for(&self, key: &Node) -> SeqNode {
        self.get_all(key).cloned().collect()
    }

    pub fn has(&self, key: impl Into<Node>) -> bool {
        self.get(&key.into()).is_some()
    }

    /// True if at least one value under `key` is not null.
    pub fn has_not_null(&self, key: impl Into<Node>) -> bool {
        let key = key.into();
        self.get_all(&key).any(|v| !v.is_null())
    }

    /// Remove every entry with `key`, returning the removed values in order.
    pub fn remove(&mut self, key: &Node) -> Vec<Node> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for (k, v) in self.entries.drain(..) {
            if &k == key {
                removed.push(v);
            } else {
                kept.push((k, v));
            }
        }
        self.entries = kept;
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl SeqNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, value: impl Into<Node>) -> &mut Self {
        self.items.push(value.into().present());
        self
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    /// Element at `index`, or [`Node::Missing`] when out of range.
    pub fn path(&self, index: usize) -> &Node {
        self.get(index).unwrap_or(&MISSING)
    }

    /// Replace the element at `index`. Out of range indexes change nothing
    /// and return `None`.
    pub fn set(&mut self, index: usize, value: impl Into<Node>) -> Option<Node> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, value.into().present()))
    }

    pub fn remove(&mut self, index: usize) -> Option<Node> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }
}

impl SetNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: IndexSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `value` unless an equal node is already present.
    pub fn add(&mut self, value: impl Into<Node>) -> &mut Self {
        self.insert(value);
        self
    }

    /// Same as [`add`](Self::add) but reports whether the value was new.
    pub fn insert(&mut self, value: impl Into<Node>) -> bool {
        self.items.insert(value.into().present())
    }

    pub fn contains(&self, value: &Node) -> bool {
        self.items.contains(value)
    }

    /// Element at insertion position `index`.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get_index(index)
    }

    pub fn path(&self, index: usize) -> &Node {
        self.get(index).unwrap_or(&MISSING)
    }

    pub fn remove(&mut self, value: &Node) -> bool {
        self.items.shift_remove(value)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Node> {
        self.items.iter()
    }
}

impl<K: Into<Node>, V: Into<Node>> FromIterator<(K, V)> for MapNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MapNode::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Node>, V: Into<Node>> Extend<(K, V)> for MapNode {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<Node>, V: Into<Node>> FromIterator<(K, V)> for OrderedMapNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMapNode::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Node>, V: Into<Node>> Extend<(K, V)> for OrderedMapNode {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<Node>, V: Into<Node>> FromIterator<(K, V)> for PairsNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pairs = PairsNode::new();
        pairs.extend(iter);
        pairs
    }
}

impl<K: Into<Node>, V: Into<Node>> Extend<(K, V)> for PairsNode {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<T: Into<Node>> FromIterator<T> for SeqNode {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = SeqNode::new();
        seq.extend(iter);
        seq
    }
}

impl<T: Into<Node>> Extend<T> for SeqNode {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl<T: Into<Node>> FromIterator<T> for SetNode {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SetNode::new();
        set.extend(iter);
        set
    }
}

impl<T: Into<Node>> Extend<T> for SetNode {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<'a> IntoIterator for &'a SeqNode {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for SeqNode {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a SetNode {
    type Item = &'a Node;
    type IntoIter = indexmap::set::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for SetNode {
    type Item = Node;
    type IntoIter = indexmap::set::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl IntoIterator for MapNode {
    type Item = (Node, Node);
    type IntoIter = std::collections::hash_map::IntoIter<Node, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl IntoIterator for OrderedMapNode {
    type Item = (Node, Node);
    type IntoIter = indexmap::map::IntoIter<Node, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl IntoIterator for PairsNode {
    type Item = (Node, Node);
    type IntoIter = std::vec::IntoIter<(Node, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_overwrites() {
        let mut map = MapNode::new();
        map.put("k", 1).put("k", 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.path("k").as_int_value(), 2);
        assert!(map.path("absent").is_missing());
    }

    #[test]
    fn ordered_map_keeps_first_slot_on_overwrite() {
        let mut map = OrderedMapNode::new();
        map.put("b", "2").put("a", "1").put("b", "3");
        let keys: Vec<_> = map.keys().map(|k| k.text_value().to_owned()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(map.path("b").text_value(), "3");
    }

    #[test]
    fn ordered_map_remove_keeps_order() {
        let mut map: OrderedMapNode = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert!(map.remove(&Node::from("b")).is_some());
        let keys: Vec<_> = map.keys().map(|k| k.text_value().to_owned()).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn pairs_lookup_outlives_the_key() {
        let mut pairs = PairsNode::new();
        pairs.put("a", "1").put("a", "2");
        let first = {
            let key = Node::from(String::from("a"));
            pairs.get(&key)
        };
        assert_eq!(first, Some(&Node::from("1")));
        assert_eq!(pairs.get(&Node::from("b")), None);
    }

    #[test]
    fn pairs_keep_duplicates() {
        let mut pairs = PairsNode::new();
        pairs.put("a", "1").put("b", "x").put("a", "2");
        assert_eq!(pairs.len(), 3);
        let all = pairs.path("a");
        assert_eq!(all.len(), 2);
        assert_eq!(all.path(0).text_value(), "1");
        assert_eq!(all.path(1).text_value(), "2");
        assert!(pairs.path("zzz").is_empty());

        assert_eq!(pairs.remove(&Node::from("a")).len(), 2);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn missing_is_stored_as_null() {
        let mut map = MapNode::new();
        map.put("k", Node::Missing);
        assert!(map.path("k").is_null());
        assert!(map.has("k"));
        assert!(!map.has_not_null("k"));

        let mut seq = SeqNode::new();
        seq.add(Node::Missing);
        assert!(seq.path(0).is_null());
    }

    #[test]
    fn sequence_index_out_of_range_is_missing() {
        let seq: SeqNode = [1, 2, 3].into_iter().collect();
        assert!(seq.path(3).is_missing());
        assert!(seq.path(usize::MAX).is_missing());
        let mut seq = seq;
        assert!(seq.set(10, 4).is_none());
        assert!(seq.remove(10).is_none());
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn set_deduplicates_structurally() {
        let mut set = SetNode::new();
        set.add("a").add(1i8).add("a").add(1i64);
        assert_eq!(set.len(), 2);
        assert_eq!(set.path(0).text_value(), "a");
        assert!(!set.insert("a"));
    }
}
