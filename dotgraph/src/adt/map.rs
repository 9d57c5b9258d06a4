//! This module implements the ordered map.

use std::cmp::Eq;
use std::collections::HashMap;
use std::hash::Hash;

/// A map that remembers the order in which keys were first inserted.
/// Replacing the value of an existing key keeps the key in its original
/// position, because the hashmap alone does not maintain a persistent
/// iteration order.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    order: Vec<K>,
    values: HashMap<K, V>,
}

impl<K: Clone + Hash + Eq, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Hash + Eq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        OrderedMap {
            order: Vec::new(),
            values: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the value for \p key, creating it with \p make (and appending
    /// the key to the order) when it does not exist.
    pub fn get_or_insert_with<F: FnOnce() -> V>(
        &mut self,
        key: &K,
        make: F,
    ) -> &mut V {
        let order = &mut self.order;
        self.values.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            make()
        })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.values.get_mut(key)
    }

    pub fn has(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(move |k| self.values.get(k))
    }
}

#[test]
fn test_ordered_map() {
    let mut map: OrderedMap<usize, usize> = OrderedMap::new();

    assert!(map.is_empty());
    for (key, val) in [(3, 30), (1, 10), (2, 20)] {
        *map.get_or_insert_with(&key, || 0) = val;
    }
    assert_eq!(map.len(), 3);

    assert!(map.has(&1));
    assert!(!map.has(&4));
    assert_eq!(*map.get(&2).unwrap(), 20);

    // Replacing a value keeps its place.
    *map.get_mut(&3).unwrap() = 33;
    let values: Vec<usize> = map.values().cloned().collect();
    assert_eq!(values, vec![33, 10, 20]);
}

#[test]
fn test_ordered_map_get_or_insert() {
    let mut map: OrderedMap<String, Vec<usize>> = OrderedMap::new();
    map.get_or_insert_with(&"a".to_string(), Vec::new).push(1);
    map.get_or_insert_with(&"b".to_string(), Vec::new).push(2);
    map.get_or_insert_with(&"a".to_string(), Vec::new).push(3);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a".to_string()).unwrap(), &vec![1, 3]);
    let values: Vec<&Vec<usize>> = map.values().collect();
    assert_eq!(values, vec![&vec![1, 3], &vec![2]]);
}
