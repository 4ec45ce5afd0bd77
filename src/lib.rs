pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod median;
pub mod output;
pub mod processing;
pub mod scan;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use median::{DualHeapMedianTracker, SlidingWindowMedianFilter};
pub use processing::{FilteredScan, ScanProcessor};
