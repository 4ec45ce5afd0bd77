use std::collections::{BTreeMap, BinaryHeap};

use crate::constants::COMPACTION_MIN_STALE;

/// One half of the dual-heap median structure
///
/// Wraps a binary heap with lazy deletion. Removed values are counted in
/// `pending` and stay in the heap until they surface at the top, where
/// [`HalfHeap::prune`] pops them. Counts are keyed by value, so duplicate
/// samples expire by multiplicity rather than identity.
///
/// `K` decides the orientation: the raw key gives a max-heap,
/// `Reverse<K>` a min-heap.
#[derive(Debug, Clone)]
pub(crate) struct HalfHeap<K> {
    heap: BinaryHeap<K>,
    pending: BTreeMap<K, usize>,
    live: usize,
    stale: usize,
}

impl<K: Ord + Copy> HalfHeap<K> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: BTreeMap::new(),
            live: 0,
            stale: 0,
        }
    }

    /// Number of values that have not been marked for removal
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Marked entries still physically present in the heap
    pub(crate) fn stale_len(&self) -> usize {
        self.stale
    }

    pub(crate) fn push(&mut self, key: K) {
        self.heap.push(key);
        self.live += 1;
    }

    /// Top live key, popping any marked entries above it first
    pub(crate) fn peek(&mut self) -> Option<K> {
        self.prune();
        self.heap.peek().copied()
    }

    /// Remove and return the top live key
    pub(crate) fn pop(&mut self) -> Option<K> {
        self.prune();
        let key = self.heap.pop()?;
        self.live -= 1;
        Some(key)
    }

    /// Record one copy of `key` as removed.
    ///
    /// The caller guarantees a live copy of `key` is in this half.
    pub(crate) fn mark(&mut self, key: K) {
        debug_assert!(self.live > 0, "marked a value in an empty half-heap");
        if self.live == 0 {
            return;
        }
        *self.pending.entry(key).or_insert(0) += 1;
        self.live -= 1;
        self.stale += 1;
        self.prune();
        if self.stale > COMPACTION_MIN_STALE && self.stale > self.live {
            self.compact();
        }
    }

    /// Pop marked entries until the top is live or the heap is empty
    pub(crate) fn prune(&mut self) {
        while let Some(top) = self.heap.peek().copied() {
            let Some(count) = self.pending.get_mut(&top) else {
                break;
            };
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&top);
            }
            self.heap.pop();
            self.stale -= 1;
        }
    }

    /// Rebuild the heap without its marked entries
    fn compact(&mut self) {
        let mut pending = std::mem::take(&mut self.pending);
        let entries = std::mem::take(&mut self.heap).into_vec();
        let before = entries.len();

        let kept: Vec<K> = entries
            .into_iter()
            .filter(|key| {
                let exhausted = match pending.get_mut(key) {
                    Some(count) => {
                        *count -= 1;
                        *count == 0
                    }
                    None => return true,
                };
                if exhausted {
                    pending.remove(key);
                }
                false
            })
            .collect();

        log::trace!("compacted half-heap: {} -> {} entries", before, kept.len());

        self.heap = BinaryHeap::from(kept);
        self.stale = pending.values().sum();
        self.pending = pending;
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.pending.clear();
        self.live = 0;
        self.stale = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Reverse;

    #[test]
    fn test_max_orientation() {
        let mut half = HalfHeap::new();
        for v in [3, 9, 1, 7] {
            half.push(v);
        }
        assert_eq!(half.peek(), Some(9));
        assert_eq!(half.pop(), Some(9));
        assert_eq!(half.peek(), Some(7));
        assert_eq!(half.len(), 3);
    }

    #[test]
    fn test_min_orientation() {
        let mut half = HalfHeap::new();
        for v in [3, 9, 1, 7] {
            half.push(Reverse(v));
        }
        assert_eq!(half.peek(), Some(Reverse(1)));
    }

    #[test]
    fn test_marked_interior_value_surfaces_later() {
        let mut half = HalfHeap::new();
        for v in [5, 4, 3] {
            half.push(v);
        }
        half.mark(4);
        assert_eq!(half.len(), 2);
        assert_eq!(half.stale_len(), 1);

        assert_eq!(half.pop(), Some(5));
        // 4 is now on top and gets pruned before 3 is exposed
        assert_eq!(half.peek(), Some(3));
        assert_eq!(half.stale_len(), 0);
    }

    #[test]
    fn test_duplicates_expire_by_count() {
        let mut half = HalfHeap::new();
        for v in [2, 2, 2, 1] {
            half.push(v);
        }
        half.mark(2);
        half.mark(2);
        assert_eq!(half.len(), 2);
        assert_eq!(half.pop(), Some(2));
        assert_eq!(half.pop(), Some(1));
        assert_eq!(half.len(), 0);
        assert_eq!(half.pop(), None);
    }

    #[test]
    fn test_compaction_drops_stale_entries() {
        let mut half = HalfHeap::new();
        half.push(1_000);
        for v in 0..200 {
            half.push(v);
        }
        // Interior values never reach the top while 1_000 is live
        for v in 0..150 {
            half.mark(v);
        }
        assert_eq!(half.len(), 51);
        assert!(half.stale_len() <= COMPACTION_MIN_STALE + 1);
        assert!(half.heap.len() < 201);

        assert_eq!(half.pop(), Some(1_000));
        assert_eq!(half.pop(), Some(199));
    }

    #[test]
    fn test_clear() {
        let mut half = HalfHeap::new();
        half.push(1);
        half.push(2);
        half.mark(1);
        half.clear();
        assert_eq!(half.len(), 0);
        assert_eq!(half.stale_len(), 0);
        assert_eq!(half.peek(), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "marked a value in an empty half-heap")]
    fn test_mark_on_empty_half_is_caught() {
        let mut half: HalfHeap<i32> = HalfHeap::new();
        half.mark(5);
    }
}
