//! Priority queue with replaceable priorities.
//!
//! `BinaryHeap` cannot decrease a key in place, so every update pushes a new
//! heap entry and the dictionary remembers which entry is current. Entries that
//! no longer match the dictionary are discarded when they surface.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Returned by [`HeapDict::pop`] when nothing is left to pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pop from an empty priority queue")]
pub struct Exhausted;

#[derive(Debug)]
struct HeapEntry<K, V> {
    value: V,
    seq: u64,
    key: K,
}

// Ordered by (value, seq) only, reversed so the max-heap pops the lowest value.
// Sequence numbers are unique, so keys never need comparing.
impl<K, V: Ord> PartialEq for HeapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, V: Ord> Eq for HeapEntry<K, V> {}

impl<K, V: Ord> PartialOrd for HeapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V: Ord> Ord for HeapEntry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        (&other.value, other.seq).cmp(&(&self.value, self.seq))
    }
}

#[derive(Debug)]
pub struct HeapDict<K, V> {
    heap: BinaryHeap<HeapEntry<K, V>>,
    dict: HashMap<K, (V, u64)>,
    next_seq: u64,
}

impl<K, V> Default for HeapDict<K, V> {
    fn default() -> Self {
        HeapDict {
            heap: BinaryHeap::new(),
            dict: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Ord> HeapDict<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`, or replace its priority if it is already queued.
    ///
    /// Among equal priorities, the earliest insertion pops first.
    pub fn insert(&mut self, key: K, value: V) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.dict.insert(key.clone(), (value.clone(), seq));
        self.heap.push(HeapEntry { value, seq, key });
    }

    /// Remove and return the key with the lowest priority.
    pub fn pop(&mut self) -> Result<(K, V), Exhausted> {
        while let Some(entry) = self.heap.pop() {
            let current = matches!(
                self.dict.get(&entry.key),
                Some((_, seq)) if *seq == entry.seq
            );
            if current {
                self.dict.remove(&entry.key);
                return Ok((entry.key, entry.value));
            }
        }
        Err(Exhausted)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.dict.get(key).map(|(value, _)| value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.dict.contains_key(key)
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Number of heap entries, stale ones included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pops_lowest_value_first() {
        let mut queue = HeapDict::new();
        queue.insert("c", 3);
        queue.insert("a", 1);
        queue.insert("b", 2);

        assert_eq!(queue.pop(), Ok(("a", 1)));
        assert_eq!(queue.pop(), Ok(("b", 2)));
        assert_eq!(queue.pop(), Ok(("c", 3)));
        assert_eq!(queue.pop(), Err(Exhausted));
    }

    #[test]
    fn test_replaced_priority_discards_stale_entry() {
        let mut queue = HeapDict::new();
        queue.insert("a", 5);
        queue.insert("b", 3);
        queue.insert("a", 1);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.heap_len(), 3);
        assert_eq!(queue.get(&"a"), Some(&1));

        assert_eq!(queue.pop(), Ok(("a", 1)));
        assert_eq!(queue.pop(), Ok(("b", 3)));
        // The stale ("a", 5) entry is skipped, not returned.
        assert_eq!(queue.pop(), Err(Exhausted));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_raised_priority_is_honoured() {
        let mut queue = HeapDict::new();
        queue.insert("a", 1);
        queue.insert("b", 2);
        queue.insert("a", 9);

        assert_eq!(queue.pop(), Ok(("b", 2)));
        assert_eq!(queue.pop(), Ok(("a", 9)));
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut queue = HeapDict::new();
        for key in ["x", "y", "z"] {
            queue.insert(key, 0);
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop().ok().map(|(k, _)| k)).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }
}
