//! Insertion-ordered hash map with O(1) unlink
//!
//! Every slot stores the keys of its predecessor and successor, so entries
//! are chained in insertion order through the map itself. Appending,
//! looking up and unlinking an entry are O(1) expected. Walking the chain
//! costs one hash probe per entry.

use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Slot<K, V> {
    value: V,
    prev: Option<K>,
    next: Option<K>,
}

#[derive(Debug, Clone)]
pub struct LinkedKeys<K, V> {
    slots: FxHashMap<K, Slot<K, V>>,
    head: Option<K>,
    tail: Option<K>,
}

impl<K, V> Default for LinkedKeys<K, V> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
            head: None,
            tail: None,
        }
    }
}

impl<K: Clone + Eq + Hash, V> LinkedKeys<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).map(|slot| &slot.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get_mut(key).map(|slot| &mut slot.value)
    }

    /// Oldest key still present
    pub fn front(&self) -> Option<&K> {
        self.head.as_ref()
    }

    /// Append `key` at the end of the chain. Returns false, leaving the map
    /// untouched, when the key is already present.
    pub fn push_back(&mut self, key: K, value: V) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        let prev = self.tail.replace(key.clone());
        match &prev {
            Some(tail) => {
                if let Some(slot) = self.slots.get_mut(tail) {
                    slot.next = Some(key.clone());
                }
            }
            None => self.head = Some(key.clone()),
        }
        self.slots.insert(
            key,
            Slot {
                value,
                prev,
                next: None,
            },
        );
        true
    }

    /// Unlink `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slots.remove(key)?;
        match &slot.prev {
            Some(prev) => {
                if let Some(before) = self.slots.get_mut::<K>(prev) {
                    before.next = slot.next.clone();
                }
            }
            None => self.head = slot.next.clone(),
        }
        match &slot.next {
            Some(next) => {
                if let Some(after) = self.slots.get_mut::<K>(next) {
                    after.prev = slot.prev.clone();
                }
            }
            None => self.tail = slot.prev.clone(),
        }
        Some(slot.value)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    /// Values in no particular order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.values_mut().map(|slot| &mut slot.value)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head.as_ref(),
        }
    }
}

/// Walk over a [`LinkedKeys`] chain in insertion order
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    slots: &'a FxHashMap<K, Slot<K, V>>,
    cursor: Option<&'a K>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots,
            cursor: self.cursor,
        }
    }
}

impl<'a, K: Eq + Hash, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, slot) = self.slots.get_key_value(self.cursor?)?;
        self.cursor = slot.next.as_ref();
        Some((key, &slot.value))
    }
}
