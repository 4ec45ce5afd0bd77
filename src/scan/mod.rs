pub mod range;
pub mod temporal;

pub use range::RangeFilter;
pub use temporal::TemporalMedianFilter;
