//! Configuration for the scan filtering pipeline.
//!
//! Every section has sensible defaults, so a TOML file only needs the keys
//! it wants to change:
//!
//! ```toml
//! [temporal]
//! window_size = 7
//! method = "heap"
//!
//! [range]
//! max = 30.0
//! out_of_range = { sentinel = 0.0 }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WINDOW_SIZE, SENSOR_MAX_RANGE, SENSOR_MIN_RANGE};
use crate::error::{FilterError, Result};

/// Valid reading interval given as `MIN..MAX`
///
/// Either side may be left open.
///
/// # Parsing formats
/// - `0.03..50` - both bounds
/// - `..50` - upper bound only
/// - `0.03..` - lower bound only
///
/// # Example
/// ```
/// use scanfilter::config::RangeBounds;
///
/// let bounds: RangeBounds = "0.03..50".parse().unwrap();
/// assert_eq!(bounds.min, Some(0.03));
/// assert_eq!(bounds.max, Some(50.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{}", min)?;
        }
        write!(f, "..")?;
        if let Some(max) = self.max {
            write!(f, "{}", max)?;
        }
        Ok(())
    }
}

impl FromStr for RangeBounds {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (lo, hi) = s
            .split_once("..")
            .ok_or_else(|| format!("invalid range (expected MIN..MAX): {}", s))?;

        let parse_bound = |part: &str| -> std::result::Result<Option<f64>, String> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            let value: f64 = part
                .parse()
                .map_err(|_| format!("invalid range bound: {}", part))?;
            if !value.is_finite() {
                return Err(format!("range bound must be finite: {}", part));
            }
            Ok(Some(value))
        };

        let bounds = Self {
            min: parse_bound(lo)?,
            max: parse_bound(hi)?,
        };

        if bounds.min.is_none() && bounds.max.is_none() {
            return Err("range needs at least one bound".to_string());
        }
        if let (Some(min), Some(max)) = (bounds.min, bounds.max)
            && min > max
        {
            return Err(format!("range minimum {} exceeds maximum {}", min, max));
        }
        Ok(bounds)
    }
}

/// Median computation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MedianMethod {
    /// Dual-heap tracker with lazy deletion, O(log M) per sample
    #[default]
    Heap,
    /// Sort the window on every sample, O(M log M) per sample
    Sort,
}

impl fmt::Display for MedianMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heap => write!(f, "heap"),
            Self::Sort => write!(f, "sort"),
        }
    }
}

/// What replaces a reading outside the valid range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Nearest bound
    #[default]
    Clamp,
    /// Fixed marker value
    Sentinel(f64),
}

/// Top-level pipeline configuration
///
/// # Example
/// ```
/// use scanfilter::config::FilterConfig;
///
/// let mut config = FilterConfig::default();
/// config.temporal.window_size = 9;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Per-index sliding-window median
    pub temporal: TemporalConfig,
    /// Range validation applied before the median
    pub range: RangeConfig,
}

/// Temporal median configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Number of past scans each median covers
    pub window_size: usize,
    /// Readings per scan; `None` takes the length of the first scan
    pub scan_size: Option<usize>,
    /// Median implementation
    pub method: MedianMethod,
}

/// Range filter configuration
///
/// The range stage is skipped when both bounds are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Smallest valid reading
    pub min: Option<f64>,
    /// Largest valid reading
    pub max: Option<f64>,
    /// Replacement for readings outside `[min, max]`
    pub out_of_range: OutOfRangePolicy,
}

impl RangeConfig {
    pub fn is_enabled(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn set_bounds(&mut self, bounds: RangeBounds) {
        self.min = bounds.min;
        self.max = bounds.max;
    }
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            scan_size: None,
            method: MedianMethod::Heap,
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: Some(SENSOR_MIN_RANGE),
            max: Some(SENSOR_MAX_RANGE),
            out_of_range: OutOfRangePolicy::Clamp,
        }
    }
}

impl FilterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| FilterError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.temporal.window_size == 0 {
            return Err(FilterError::InvalidConfiguration(
                "window size must be > 0".to_string(),
            ));
        }
        if self.temporal.scan_size == Some(0) {
            return Err(FilterError::InvalidConfiguration(
                "scan size must be > 0".to_string(),
            ));
        }

        if self.range.is_enabled() {
            for bound in [self.range.min, self.range.max].into_iter().flatten() {
                if !bound.is_finite() {
                    return Err(FilterError::InvalidConfiguration(format!(
                        "range bound must be finite, got {}",
                        bound
                    )));
                }
            }
            if let (Some(min), Some(max)) = (self.range.min, self.range.max)
                && min > max
            {
                return Err(FilterError::InvalidConfiguration(format!(
                    "range minimum {} exceeds maximum {}",
                    min, max
                )));
            }
        }

        if let OutOfRangePolicy::Sentinel(sentinel) = self.range.out_of_range
            && !sentinel.is_finite()
        {
            return Err(FilterError::InvalidConfiguration(format!(
                "sentinel must be finite, got {}",
                sentinel
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_both() {
        let bounds: RangeBounds = "0.03..50".parse().unwrap();
        assert_eq!(bounds.min, Some(0.03));
        assert_eq!(bounds.max, Some(50.0));
        assert_eq!(bounds.to_string(), "0.03..50");
    }

    #[test]
    fn test_range_bounds_open_ends() {
        let bounds: RangeBounds = "..35.8".parse().unwrap();
        assert_eq!(bounds.min, None);
        assert_eq!(bounds.max, Some(35.8));

        let bounds: RangeBounds = " 20 .. ".parse().unwrap();
        assert_eq!(bounds.min, Some(20.0));
        assert_eq!(bounds.max, None);
    }

    #[test]
    fn test_range_bounds_invalid() {
        assert!("..".parse::<RangeBounds>().is_err());
        assert!("50".parse::<RangeBounds>().is_err());
        assert!("10..9.9999".parse::<RangeBounds>().is_err());
        assert!("abc..5".parse::<RangeBounds>().is_err());
        assert!("inf..".parse::<RangeBounds>().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FilterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temporal.method, MedianMethod::Heap);
        assert!(config.range.is_enabled());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = FilterConfig::from_toml_str(
            r#"
            [temporal]
            window_size = 3
            method = "sort"

            [range]
            max = 35.8
            out_of_range = { sentinel = 0.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.temporal.window_size, 3);
        assert_eq!(config.temporal.scan_size, None);
        assert_eq!(config.temporal.method, MedianMethod::Sort);
        assert_eq!(config.range.min, Some(SENSOR_MIN_RANGE));
        assert_eq!(config.range.max, Some(35.8));
        assert_eq!(config.range.out_of_range, OutOfRangePolicy::Sentinel(0.0));
    }

    #[test]
    fn test_toml_rejects_bad_window() {
        let zero = FilterConfig::from_toml_str("[temporal]\nwindow_size = 0\n");
        assert!(matches!(zero, Err(FilterError::InvalidConfiguration(_))));

        let negative = FilterConfig::from_toml_str("[temporal]\nwindow_size = -3\n");
        assert!(matches!(negative, Err(FilterError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = FilterConfig::default();
        config.range.min = Some(10.0);
        config.range.max = Some(9.9999);
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_non_finite_sentinel_rejected() {
        let mut config = FilterConfig::default();
        config.range.out_of_range = OutOfRangePolicy::Sentinel(f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidConfiguration(_))
        ));

        let from_toml = FilterConfig::from_toml_str("[range]\nout_of_range = { sentinel = nan }\n");
        assert!(matches!(
            from_toml,
            Err(FilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_scan_size_left_open_unless_set() {
        let unset = FilterConfig::from_toml_str("[temporal]\nwindow_size = 4\n").unwrap();
        assert_eq!(unset.temporal.scan_size, None);

        let set = FilterConfig::from_toml_str("[temporal]\nscan_size = 90\n").unwrap();
        assert_eq!(set.temporal.scan_size, Some(90));

        let zero = FilterConfig::from_toml_str("[temporal]\nscan_size = 0\n");
        assert!(matches!(zero, Err(FilterError::InvalidConfiguration(_))));
    }
}
