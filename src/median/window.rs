use std::collections::VecDeque;

use crate::error::{FilterError, Result};
use crate::median::filter::MedianFilter;
use crate::median::sample::Sample;
use crate::median::tracker::DualHeapMedianTracker;

/// Sliding-window median filter
///
/// Reports the median of the last `window_size` samples. Until the window
/// fills, the median is taken over the samples seen so far.
///
/// Each update inserts the new sample into a [`DualHeapMedianTracker`] and,
/// once the window overflows, marks the oldest sample for lazy removal.
/// Amortized cost is O(log M) per sample.
///
/// # Example
/// ```
/// use scanfilter::median::SlidingWindowMedianFilter;
///
/// let mut filter = SlidingWindowMedianFilter::new(3).unwrap();
/// let medians: Vec<f64> = [5.0, 1.0, 4.0, 2.0, 8.0]
///     .into_iter()
///     .map(|v| filter.update(v).unwrap())
///     .collect();
/// assert_eq!(medians, vec![5.0, 3.0, 4.0, 2.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SlidingWindowMedianFilter<T> {
    window_size: usize,
    history: VecDeque<T>,
    tracker: DualHeapMedianTracker<T>,
}

impl<T: Sample> SlidingWindowMedianFilter<T> {
    /// Create a filter over the last `window_size` samples
    ///
    /// # Errors
    /// [`FilterError::InvalidConfiguration`] if `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(FilterError::InvalidConfiguration(
                "window size must be > 0".to_string(),
            ));
        }

        Ok(Self {
            window_size,
            history: VecDeque::with_capacity(window_size + 1),
            tracker: DualHeapMedianTracker::new(),
        })
    }

    /// Admit `value` and return the median of the current window
    pub fn update(&mut self, value: T) -> Result<T> {
        self.history.push_back(value);
        self.tracker.insert(value);

        if self.history.len() > self.window_size
            && let Some(oldest) = self.history.pop_front()
        {
            self.tracker.mark_for_removal(oldest)?;
        }

        self.tracker.median()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Samples currently inside the window
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.history.len() == self.window_size
    }

    /// Underlying tracker, for inspecting balance and pending removals
    pub fn tracker(&self) -> &DualHeapMedianTracker<T> {
        &self.tracker
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.tracker.clear();
    }
}

impl<T: Sample> MedianFilter<T> for SlidingWindowMedianFilter<T> {
    fn update(&mut self, value: T) -> Result<T> {
        SlidingWindowMedianFilter::update(self, value)
    }

    fn window_size(&self) -> usize {
        self.window_size
    }

    fn len(&self) -> usize {
        self.history.len()
    }

    fn reset(&mut self) {
        SlidingWindowMedianFilter::reset(self)
    }
}
