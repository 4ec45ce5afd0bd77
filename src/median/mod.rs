pub mod filter;
mod half_heap;
pub mod sample;
pub mod sorted;
pub mod tracker;
pub mod window;

pub use filter::{ColumnFilter, MedianFilter};
pub use sample::Sample;
pub use sorted::{SortingMedianFilter, median_of};
pub use tracker::DualHeapMedianTracker;
pub use window::SlidingWindowMedianFilter;
