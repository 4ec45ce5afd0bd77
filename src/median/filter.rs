use crate::config::MedianMethod;
use crate::error::Result;
use crate::median::sample::Sample;
use crate::median::sorted::SortingMedianFilter;
use crate::median::window::SlidingWindowMedianFilter;

/// Common trait for sliding-window median filters
///
/// Implemented by SlidingWindowMedianFilter and SortingMedianFilter.
pub trait MedianFilter<T: Sample> {
    /// Admit one sample and return the median of the current window
    fn update(&mut self, value: T) -> Result<T>;

    /// Run a whole stream through the filter, one median per sample
    fn update_all(&mut self, values: &[T]) -> Result<Vec<T>> {
        values.iter().map(|&v| self.update(v)).collect()
    }

    fn window_size(&self) -> usize;

    /// Samples currently inside the window
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all samples, keeping the window size
    fn reset(&mut self);
}

/// Per-column filter selected by [`MedianMethod`]
#[derive(Debug, Clone)]
pub enum ColumnFilter<T> {
    Heap(SlidingWindowMedianFilter<T>),
    Sort(SortingMedianFilter<T>),
}

impl<T: Sample> ColumnFilter<T> {
    pub fn new(method: MedianMethod, window_size: usize) -> Result<Self> {
        match method {
            MedianMethod::Heap => Ok(Self::Heap(SlidingWindowMedianFilter::new(window_size)?)),
            MedianMethod::Sort => Ok(Self::Sort(SortingMedianFilter::new(window_size)?)),
        }
    }

    pub fn method(&self) -> MedianMethod {
        match self {
            Self::Heap(_) => MedianMethod::Heap,
            Self::Sort(_) => MedianMethod::Sort,
        }
    }
}

impl<T: Sample> MedianFilter<T> for ColumnFilter<T> {
    fn update(&mut self, value: T) -> Result<T> {
        match self {
            Self::Heap(filter) => filter.update(value),
            Self::Sort(filter) => filter.update(value),
        }
    }

    fn window_size(&self) -> usize {
        match self {
            Self::Heap(filter) => filter.window_size(),
            Self::Sort(filter) => filter.window_size(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Heap(filter) => filter.len(),
            Self::Sort(filter) => filter.len(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Heap(filter) => filter.reset(),
            Self::Sort(filter) => filter.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_agree() {
        let stream = [0.5, 9.0, 3.0, 3.0, 7.5, 1.0, 2.0, 8.0, 8.0, 4.0];
        let mut heap = ColumnFilter::new(MedianMethod::Heap, 4).unwrap();
        let mut sort = ColumnFilter::new(MedianMethod::Sort, 4).unwrap();

        assert_eq!(heap.method(), MedianMethod::Heap);
        assert_eq!(sort.method(), MedianMethod::Sort);
        assert_eq!(
            heap.update_all(&stream).unwrap(),
            sort.update_all(&stream).unwrap()
        );
    }

    #[test]
    fn test_reset_clears_window() {
        let mut filter = ColumnFilter::new(MedianMethod::Heap, 3).unwrap();
        filter.update_all(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(filter.len(), 3);
        filter.reset();
        assert!(filter.is_empty());
        assert_eq!(filter.update(10.0).unwrap(), 10.0);
        assert_eq!(filter.window_size(), 3);
    }
}
