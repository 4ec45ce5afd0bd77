use std::collections::VecDeque;

use crate::error::{FilterError, Result};
use crate::median::filter::MedianFilter;
use crate::median::sample::Sample;

/// Median of a slice by sorting a copy
///
/// Returns `None` for an empty slice. Even lengths give the midpoint of the
/// two middle values.
pub fn median_of<T: Sample>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<T> = values.iter().map(|v| v.canonical()).collect();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some(T::midpoint(sorted[n / 2 - 1], sorted[n / 2]))
    }
}

/// Brute-force sliding-window median
///
/// Keeps the window in a ring buffer and sorts a copy on every update,
/// O(M log M) per sample. Serves as the baseline the heap filter is
/// measured against.
#[derive(Debug, Clone)]
pub struct SortingMedianFilter<T> {
    window_size: usize,
    window: VecDeque<T>,
}

impl<T: Sample> SortingMedianFilter<T> {
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(FilterError::InvalidConfiguration(
                "window size must be > 0".to_string(),
            ));
        }

        Ok(Self {
            window_size,
            window: VecDeque::with_capacity(window_size),
        })
    }
}

impl<T: Sample> MedianFilter<T> for SortingMedianFilter<T> {
    fn update(&mut self, value: T) -> Result<T> {
        if self.window.len() == self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(value);

        let (front, back) = self.window.as_slices();
        let mut values = Vec::with_capacity(self.window.len());
        values.extend_from_slice(front);
        values.extend_from_slice(back);
        median_of(&values).ok_or(FilterError::EmptyStructure)
    }

    fn window_size(&self) -> usize {
        self.window_size
    }

    fn len(&self) -> usize {
        self.window.len()
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
