//! Sensor and tuning constants
//!
//! Range limits describe the rotating rangefinder the filters were tuned
//! for. Readings outside them are not physically meaningful.

/// Closest distance the rangefinder reports reliably, in meters.
pub const SENSOR_MIN_RANGE: f64 = 0.03;

/// Farthest distance the rangefinder reports reliably, in meters.
pub const SENSOR_MAX_RANGE: f64 = 50.0;

/// Default temporal window, in scans.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default number of readings per scan (one per degree).
pub const DEFAULT_SCAN_SIZE: usize = 360;

/// A half-heap is rebuilt once it carries more stale entries than this and
/// more stale entries than live ones.
pub const COMPACTION_MIN_STALE: usize = 64;
