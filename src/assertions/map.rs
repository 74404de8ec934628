//! Map assertions
//!
//! `BTreeMap` and `HashMap` subjects. Ordered checks compare against the
//! map's iteration order: sorted by key for `BTreeMap`, unspecified for
//! `HashMap`.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tidemark::prelude::*;
//!
//! let map: BTreeMap<&str, i32> = [("t", 1), ("u", 2)].into_iter().collect();
//!
//! let keys = Builder::<BTreeMap<&str, i32>>::new()
//!     .contains_keys_in_order(vec!["t", "u"]);
//! let swapped = Builder::<BTreeMap<&str, i32>>::new()
//!     .contains_in_order(vec![("u", 2), ("t", 1)]);
//!
//! assert!(keys.test(&map));
//! assert!(!swapped.test(&map));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::collection::{list, non_empty};
use crate::analysis::{checker_outcome, AnalysisMode};
use crate::message::catalog::{self, MessageKey};
use crate::parameter::{ParamValue, ParameterRecord, Subject};
use crate::step::{Builder, Leaf, Step};

/// A key/value map.
pub trait Entries: Subject + Send + Sync {
    /// Key type.
    type Key: Subject + PartialEq + Send + Sync;
    /// Value type.
    type Value: Subject + PartialEq + Send + Sync;

    /// Borrow every entry, in iteration order.
    fn entries(&self) -> Vec<(&Self::Key, &Self::Value)>;

    /// Value stored for `key`.
    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Number of entries.
    fn size(&self) -> usize;
}

impl<K, V> Entries for BTreeMap<K, V>
where
    K: Subject + Ord + Send + Sync,
    V: Subject + PartialEq + Send + Sync,
{
    type Key = K;
    type Value = V;

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Entries for HashMap<K, V, S>
where
    K: Subject + Eq + Hash + Send + Sync,
    V: Subject + PartialEq + Send + Sync,
    S: BuildHasher + Send + Sync + 'static,
{
    type Key = K;
    type Value = V;

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Assertions on maps with keys `K` and values `V`.
pub trait MapAssertions<K, V, M> {
    /// The map has no entries.
    fn is_empty(self) -> Step<M>;

    /// The map has exactly `size` entries.
    fn has_size(self, size: usize) -> Step<M>;

    /// The map has an entry for `key`.
    fn contains_key(self, key: K) -> Step<M>;

    /// The map has an entry for every one of `keys`.
    fn contains_all_keys(self, keys: Vec<K>) -> Step<M>;

    /// Some entry has the value `value`.
    fn contains_value(self, value: V) -> Step<M>;

    /// The map maps `key` to `value`.
    fn contains_entry(self, key: K, value: V) -> Step<M>;

    /// Iterating the map yields `entries` as a contiguous run.
    fn contains_in_order(self, entries: Vec<(K, V)>) -> Step<M>;

    /// Iterating the keys yields `keys` as a contiguous run.
    fn contains_keys_in_order(self, keys: Vec<K>) -> Step<M>;
}

fn entry_list<K: Subject, V: Subject>(entries: &[(K, V)]) -> ParameterRecord {
    ParameterRecord::new(ParamValue::Entries(
        entries
            .iter()
            .map(|(k, v)| (k.describe(), v.describe()))
            .collect(),
    ))
}

fn counted_keys<M: Entries>(key: MessageKey, mode: AnalysisMode, keys: Vec<M::Key>) -> Leaf<M> {
    let record = list(&keys);
    let precondition = non_empty(keys.is_empty());
    Leaf::new(key, move |map: &M, negate| {
        let found = mode.count(&keys, |k| map.lookup(k).is_some());
        checker_outcome(true, negate, found, keys.len())
    })
    .precondition(precondition)
    .parameter(record)
}

impl<M: Entries> MapAssertions<M::Key, M::Value, M> for Builder<M> {
    fn is_empty(self) -> Step<M> {
        self.push(Leaf::new(catalog::MAP_EMPTY, |map: &M, _| map.size() == 0))
    }

    fn has_size(self, size: usize) -> Step<M> {
        let leaf = Leaf::new(catalog::MAP_SIZE, move |map: &M, _| map.size() == size)
            .parameter(ParameterRecord::new(size));
        self.push(leaf)
    }

    fn contains_key(self, key: M::Key) -> Step<M> {
        let record = ParameterRecord::of(&key);
        let leaf = Leaf::new(catalog::MAP_CONTAINS_KEY, move |map: &M, _| {
            map.lookup(&key).is_some()
        })
        .parameter(record);
        self.push(leaf)
    }

    fn contains_all_keys(self, keys: Vec<M::Key>) -> Step<M> {
        let mode = self.analysis();
        self.push(counted_keys(catalog::MAP_CONTAINS_ALL_KEYS, mode, keys))
    }

    fn contains_value(self, value: M::Value) -> Step<M> {
        let mode = self.analysis();
        let record = ParameterRecord::of(&value);
        let leaf = Leaf::new(catalog::MAP_CONTAINS_VALUE, move |map: &M, negate| {
            let entries = map.entries();
            let found = mode.count(&entries, |(_, v)| **v == value);
            checker_outcome(false, negate, found, entries.len())
        })
        .parameter(record);
        self.push(leaf)
    }

    fn contains_entry(self, key: M::Key, value: M::Value) -> Step<M> {
        let record = ParameterRecord::new(ParamValue::Entries(vec![(
            key.describe(),
            value.describe(),
        )]));
        let leaf = Leaf::new(catalog::MAP_CONTAINS_ENTRY, move |map: &M, _| {
            map.lookup(&key) == Some(&value)
        })
        .parameter(record);
        self.push(leaf)
    }

    fn contains_in_order(self, entries: Vec<(M::Key, M::Value)>) -> Step<M> {
        let mode = self.analysis();
        let record = entry_list(&entries);
        let precondition = non_empty(entries.is_empty());
        let leaf = Leaf::new(catalog::MAP_CONTAINS_IN_ORDER, move |map: &M, _| {
            let pattern: Vec<(&M::Key, &M::Value)> =
                entries.iter().map(|(k, v)| (k, v)).collect();
            mode.contains_in_order(&map.entries(), &pattern)
        })
        .precondition(precondition)
        .parameter(record);
        self.push(leaf)
    }

    fn contains_keys_in_order(self, keys: Vec<M::Key>) -> Step<M> {
        let mode = self.analysis();
        let record = list(&keys);
        let precondition = non_empty(keys.is_empty());
        let leaf = Leaf::new(catalog::MAP_CONTAINS_KEYS_IN_ORDER, move |map: &M, _| {
            let actual: Vec<&M::Key> = map.entries().into_iter().map(|(k, _)| k).collect();
            let pattern: Vec<&M::Key> = keys.iter().collect();
            mode.contains_in_order(&actual, &pattern)
        })
        .precondition(precondition)
        .parameter(record);
        self.push(leaf)
    }
}
