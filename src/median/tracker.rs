use std::cmp::Reverse;

use crate::error::{FilterError, Result};
use crate::median::half_heap::HalfHeap;
use crate::median::sample::{Ordered, Sample};

/// Running median over a multiset supporting insertion and lazy removal
///
/// The lower half lives in a max-heap and the upper half in a min-heap.
/// Every live value in the lower half is `<=` every live value in the
/// upper half, and the lower half holds either as many live values as the
/// upper half or exactly one more. The median is then read from the tops
/// in O(1).
///
/// Removing an arbitrary value from a heap is not sub-linear, so
/// [`DualHeapMedianTracker::mark_for_removal`] only records the value as
/// pending. It is physically dropped when it reaches the top of its half.
/// Every operation that inspects a top prunes first, so a removed value is
/// never reported and never counted when balancing.
///
/// # Example
/// ```
/// use scanfilter::median::DualHeapMedianTracker;
///
/// let mut tracker = DualHeapMedianTracker::new();
/// for v in [5.0, 1.0, 4.0] {
///     tracker.insert(v);
/// }
/// assert_eq!(tracker.median().unwrap(), 4.0);
///
/// tracker.mark_for_removal(5.0).unwrap();
/// assert_eq!(tracker.median().unwrap(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct DualHeapMedianTracker<T> {
    lower: HalfHeap<Ordered<T>>,
    upper: HalfHeap<Reverse<Ordered<T>>>,
}

impl<T: Sample> DualHeapMedianTracker<T> {
    pub fn new() -> Self {
        Self {
            lower: HalfHeap::new(),
            upper: HalfHeap::new(),
        }
    }

    /// Add a value and restore the size invariant
    ///
    /// Values no greater than the lower top go to the lower half, the rest
    /// to the upper half. O(log n).
    pub fn insert(&mut self, value: T) {
        // Pending removals may have drained the lower half; the placement
        // rule needs its top.
        self.rebalance();

        let key = Ordered::new(value);
        match self.lower.peek() {
            Some(top) if key > top => self.upper.push(Reverse(key)),
            _ => self.lower.push(key),
        }
        self.rebalance();
    }

    /// Logically remove one copy of `value`
    ///
    /// The value must currently be live in the tracker. Debug builds assert
    /// that the half it is charged to is not empty; nothing else is checked.
    /// Physical removal is deferred until the value surfaces at a heap top.
    /// Sizes are left unbalanced until the next [`insert`](Self::insert) or
    /// [`median`](Self::median).
    ///
    /// # Errors
    /// [`FilterError::EmptyStructure`] if no values are live.
    pub fn mark_for_removal(&mut self, value: T) -> Result<()> {
        if self.is_empty() {
            return Err(FilterError::EmptyStructure);
        }

        let key = Ordered::new(value);
        match self.lower.peek() {
            Some(top) if key <= top => self.lower.mark(key),
            _ => self.upper.mark(Reverse(key)),
        }
        Ok(())
    }

    /// Current median of the live values
    ///
    /// Even counts return the midpoint of the two middle values.
    ///
    /// # Errors
    /// [`FilterError::EmptyStructure`] if no values are live.
    pub fn median(&mut self) -> Result<T> {
        self.rebalance();

        let lower_top = self.lower.peek().ok_or(FilterError::EmptyStructure)?;
        if self.lower.len() > self.upper.len() {
            return Ok(lower_top.0);
        }

        match self.upper.peek() {
            Some(Reverse(upper_top)) => Ok(T::midpoint(lower_top.0, upper_top.0)),
            None => Err(FilterError::EmptyStructure),
        }
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live values in the lower (max) half
    pub fn lower_len(&self) -> usize {
        self.lower.len()
    }

    /// Live values in the upper (min) half
    pub fn upper_len(&self) -> usize {
        self.upper.len()
    }

    /// Removed values still waiting to be popped
    pub fn pending_removals(&self) -> usize {
        self.lower.stale_len() + self.upper.stale_len()
    }

    pub fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }

    /// Move tops across until `lower == upper` or `lower == upper + 1`.
    ///
    /// Moved values are live tops, so the ordering between halves holds.
    fn rebalance(&mut self) {
        while self.lower.len() > self.upper.len() + 1 {
            let Some(key) = self.lower.pop() else { break };
            self.upper.push(Reverse(key));
        }
        while self.upper.len() > self.lower.len() {
            let Some(Reverse(key)) = self.upper.pop() else {
                break;
            };
            self.lower.push(key);
        }
        self.lower.prune();
        self.upper.prune();
    }
}

impl<T: Sample> Default for DualHeapMedianTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::median::median_of;

    fn assert_balanced<T: Sample>(tracker: &DualHeapMedianTracker<T>) {
        let (lo, hi) = (tracker.lower_len(), tracker.upper_len());
        assert!(
            lo == hi || lo == hi + 1,
            "unbalanced halves: lower {} upper {}",
            lo,
            hi
        );
    }

    #[test]
    fn test_empty_median_fails() {
        let mut tracker: DualHeapMedianTracker<f64> = DualHeapMedianTracker::new();
        assert!(matches!(tracker.median(), Err(FilterError::EmptyStructure)));
    }

    #[test]
    fn test_mark_on_empty_fails() {
        let mut tracker: DualHeapMedianTracker<f64> = DualHeapMedianTracker::new();
        assert!(matches!(
            tracker.mark_for_removal(1.0),
            Err(FilterError::EmptyStructure)
        ));
    }

    #[test]
    fn test_odd_and_even_counts() {
        let mut tracker = DualHeapMedianTracker::new();
        tracker.insert(5.0);
        assert_eq!(tracker.median().unwrap(), 5.0);
        tracker.insert(1.0);
        assert_eq!(tracker.median().unwrap(), 3.0);
        tracker.insert(4.0);
        assert_eq!(tracker.median().unwrap(), 4.0);
        tracker.insert(2.0);
        assert_eq!(tracker.median().unwrap(), 3.0);
    }

    #[test]
    fn test_balance_after_every_insert() {
        let mut tracker = DualHeapMedianTracker::new();
        for v in [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 10, 11, 12] {
            tracker.insert(v);
            assert_balanced(&tracker);
        }
        assert_eq!(tracker.len(), 13);
    }

    #[test]
    fn test_removing_everything_empties_tracker() {
        let mut tracker = DualHeapMedianTracker::new();
        let values = [3.0, 1.0, 2.0, 2.0];
        for v in values {
            tracker.insert(v);
        }
        for v in values {
            tracker.mark_for_removal(v).unwrap();
        }
        assert!(tracker.is_empty());
        assert!(matches!(tracker.median(), Err(FilterError::EmptyStructure)));
    }

    #[test]
    fn test_removed_value_never_reported() {
        let mut tracker = DualHeapMedianTracker::new();
        for v in [10.0, 20.0, 30.0] {
            tracker.insert(v);
        }
        assert_eq!(tracker.median().unwrap(), 20.0);

        tracker.mark_for_removal(20.0).unwrap();
        assert_eq!(tracker.median().unwrap(), 20.0); // midpoint of 10 and 30
        tracker.mark_for_removal(10.0).unwrap();
        assert_eq!(tracker.median().unwrap(), 30.0);
        assert_balanced(&tracker);
    }

    #[test]
    fn test_duplicate_removal_by_multiplicity() {
        let mut tracker = DualHeapMedianTracker::new();
        for v in [4, 4, 4, 1, 9] {
            tracker.insert(v);
        }
        tracker.mark_for_removal(4).unwrap();
        tracker.mark_for_removal(4).unwrap();
        // live: [1, 4, 9]
        assert_eq!(tracker.median().unwrap(), 4);
        tracker.mark_for_removal(4).unwrap();
        // live: [1, 9]
        assert_eq!(tracker.median().unwrap(), 5);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_repeated_median_is_stable() {
        let mut tracker = DualHeapMedianTracker::new();
        for v in [7.0, 3.0, 3.0, 8.0, 1.0, 6.0] {
            tracker.insert(v);
        }
        tracker.mark_for_removal(3.0).unwrap();
        tracker.mark_for_removal(8.0).unwrap();

        let first = tracker.median().unwrap();
        for _ in 0..5 {
            assert_eq!(tracker.median().unwrap(), first);
        }
        assert_eq!(first, 4.5);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let mut tracker = DualHeapMedianTracker::new();
        tracker.insert(-0.0);
        tracker.insert(1.0);
        tracker.mark_for_removal(0.0).unwrap();
        assert_eq!(tracker.median().unwrap(), 1.0);
    }

    #[test]
    fn test_interleaved_against_oracle() {
        // Deterministic LCG keeps this self-contained
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 50) as i64
        };

        let mut tracker = DualHeapMedianTracker::new();
        let mut live: Vec<i64> = Vec::new();

        for step in 0..2_000 {
            let v = next();
            if step % 3 == 2 && !live.is_empty() {
                let idx = (v as usize) % live.len();
                let removed = live.swap_remove(idx);
                tracker.mark_for_removal(removed).unwrap();
            } else {
                tracker.insert(v);
                live.push(v);
            }

            if live.is_empty() {
                assert!(tracker.median().is_err());
            } else {
                assert_eq!(tracker.median().unwrap(), median_of(&live).unwrap());
                assert_balanced(&tracker);
            }
        }
    }

    #[test]
    fn test_median_of_huge_values_stays_finite() {
        let mut tracker = DualHeapMedianTracker::new();
        tracker.insert(f64::MAX);
        tracker.insert(f64::MAX);
        assert_eq!(tracker.median().unwrap(), f64::MAX);

        tracker.mark_for_removal(f64::MAX).unwrap();
        tracker.insert(1.5e308);
        let median = tracker.median().unwrap();
        assert!(median.is_finite());
        assert_eq!(median, f64::midpoint(1.5e308, f64::MAX));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "marked a value in an empty half-heap")]
    fn test_marking_absent_value_is_caught() {
        let mut tracker = DualHeapMedianTracker::new();
        tracker.insert(1.0);
        // 5.0 sorts above the lower top, so it is charged to the empty upper half
        let _ = tracker.mark_for_removal(5.0);
    }
}
